//! Job configuration documents and schema detection.
//!
//! Jenkins serves one `config.xml` per job in one of two competing
//! schemas: the Maven module set (`<maven2-moduleset>`) and the
//! Freestyle project (`<project>`). The schema is detected from the
//! document's root element, so decoding resolves to exactly one variant
//! of [`JobConfig`] or reports the schema as unrecognized.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Deserialize;

use crate::error::{
    Error,
    Result,
};
use crate::types::JobType;

const MAVEN_ROOT: &str = "maven2-moduleset";
const FREESTYLE_ROOT: &str = "project";

/// SCM `class` discriminator of Git-backed jobs.
const GIT_SCM_CLASS: &str = "GitSCM";

/// A decoded job configuration document, one variant per schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobConfig {
    Maven(MavenConfig),
    Freestyle(FreestyleConfig),
}

impl JobConfig {
    pub fn job_type(&self) -> JobType {
        match self {
            JobConfig::Maven(_) => JobType::Maven,
            JobConfig::Freestyle(_) => JobType::Freestyle,
        }
    }

    /// Source-control block, shared by both schemas.
    pub fn scm(&self) -> &Scm {
        match self {
            JobConfig::Maven(config) => &config.scm,
            JobConfig::Freestyle(config) => &config.scm,
        }
    }
}

/// Maven module set project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MavenConfig {
    #[serde(default)]
    pub scm: Scm,
    #[serde(default, rename = "rootModule")]
    pub root_module: RootModule,
    #[serde(default)]
    pub publishers: Publishers,
}

/// Freestyle project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FreestyleConfig {
    #[serde(default)]
    pub scm: Scm,
}

/// Source-control block of a job configuration.
///
/// The `class` attribute names the SCM implementation; the remote and
/// branch lists are only populated by the Git implementation. Minimally
/// configured jobs may omit any of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Scm {
    #[serde(default, rename = "@class")]
    pub class: String,
    #[serde(default, rename = "userRemoteConfigs")]
    pub user_remote_configs: UserRemoteConfigs,
    #[serde(default)]
    pub branches: Branches,
}

impl Scm {
    pub fn is_git(&self) -> bool {
        self.class.contains(GIT_SCM_CLASS)
    }

    /// Remote repository URLs, in configuration order. Empty unless the
    /// job is Git-backed.
    pub fn git_urls(&self) -> Vec<String> {
        if !self.is_git() {
            return Vec::new();
        }
        self.user_remote_configs
            .remotes
            .iter()
            .map(|remote| remote.url.clone())
            .collect()
    }

    /// Branch spec patterns (e.g. `*/master`), in configuration order.
    /// Empty unless the job is Git-backed.
    pub fn branch_specs(&self) -> Vec<String> {
        if !self.is_git() {
            return Vec::new();
        }
        self.branches
            .specs
            .iter()
            .map(|spec| spec.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserRemoteConfigs {
    #[serde(default, rename = "hudson.plugins.git.UserRemoteConfig")]
    pub remotes: Vec<UserRemoteConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserRemoteConfig {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Branches {
    #[serde(default, rename = "hudson.plugins.git.BranchSpec")]
    pub specs: Vec<BranchSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BranchSpec {
    #[serde(default)]
    pub name: String,
}

/// Root Maven module of a Maven job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RootModule {
    #[serde(default, rename = "groupId")]
    pub group_id: String,
    #[serde(default, rename = "artifactId")]
    pub artifact_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Publishers {
    #[serde(default, rename = "hudson.maven.RedeployPublisher")]
    pub redeploy_publishers: Vec<RedeployPublisher>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RedeployPublisher {
    #[serde(default)]
    pub url: String,
}

/// Decodes a raw configuration document, detecting the schema from the
/// root element.
///
/// An unrecognized root element (or a document with no root element at
/// all) yields [`Error::UnrecognizedSchema`], which callers treat as
/// recoverable: the job exists, its schema just isn't one of ours. A
/// recognized root with a malformed body yields [`Error::Decode`].
pub fn parse_config(raw: &str) -> Result<JobConfig> {
    match root_element(raw)?.as_str() {
        MAVEN_ROOT => quick_xml::de::from_str::<MavenConfig>(raw)
            .map(JobConfig::Maven)
            .map_err(|e| Error::Decode(e.to_string())),
        FREESTYLE_ROOT => quick_xml::de::from_str::<FreestyleConfig>(raw)
            .map(JobConfig::Freestyle)
            .map_err(|e| Error::Decode(e.to_string())),
        other => Err(Error::UnrecognizedSchema(format!("root element <{other}>"))),
    }
}

/// Name of the document's root element, skipping the XML declaration,
/// comments and whitespace.
fn root_element(raw: &str) -> Result<String> {
    let mut reader = Reader::from_str(raw);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                return String::from_utf8(start.name().as_ref().to_vec())
                    .map_err(|e| Error::Decode(e.to_string()));
            }
            Ok(Event::Empty(start)) => {
                return String::from_utf8(start.name().as_ref().to_vec())
                    .map_err(|e| Error::Decode(e.to_string()));
            }
            Ok(Event::Eof) => {
                return Err(Error::UnrecognizedSchema(
                    "document has no root element".to_string(),
                ));
            }
            Ok(_) => continue,
            Err(e) => return Err(Error::UnrecognizedSchema(format!("not well-formed: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAVEN_CONFIG: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<maven2-moduleset>
  <description>Builds and deploys the deployer service</description>
  <scm class="hudson.plugins.git.GitSCM">
    <userRemoteConfigs>
      <hudson.plugins.git.UserRemoteConfig>
        <url>git@github.example.com:platform/deployer.git</url>
      </hudson.plugins.git.UserRemoteConfig>
      <hudson.plugins.git.UserRemoteConfig>
        <url>git@mirror.example.com:platform/deployer.git</url>
      </hudson.plugins.git.UserRemoteConfig>
    </userRemoteConfigs>
    <branches>
      <hudson.plugins.git.BranchSpec>
        <name>*/master</name>
      </hudson.plugins.git.BranchSpec>
      <hudson.plugins.git.BranchSpec>
        <name>*/release</name>
      </hudson.plugins.git.BranchSpec>
    </branches>
  </scm>
  <rootModule>
    <groupId>com.example.platform</groupId>
    <artifactId>deployer</artifactId>
  </rootModule>
  <publishers>
    <hudson.maven.RedeployPublisher>
      <url>https://nexus.example.com/content/repositories/releases</url>
    </hudson.maven.RedeployPublisher>
  </publishers>
</maven2-moduleset>
"#;

    const FREESTYLE_CONFIG: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<project>
  <keepDependencies>false</keepDependencies>
  <scm class="hudson.plugins.git.GitSCM">
    <userRemoteConfigs>
      <hudson.plugins.git.UserRemoteConfig>
        <url>git@github.example.com:platform/website.git</url>
      </hudson.plugins.git.UserRemoteConfig>
    </userRemoteConfigs>
    <branches>
      <hudson.plugins.git.BranchSpec>
        <name>*/develop</name>
      </hudson.plugins.git.BranchSpec>
    </branches>
  </scm>
</project>
"#;

    #[test]
    fn maven_document_decodes_to_maven_variant() {
        let config = parse_config(MAVEN_CONFIG).unwrap();
        assert_eq!(config.job_type(), crate::types::JobType::Maven);

        let JobConfig::Maven(maven) = config else {
            panic!("expected Maven variant");
        };
        assert_eq!(maven.root_module.group_id, "com.example.platform");
        assert_eq!(maven.root_module.artifact_id, "deployer");
        assert_eq!(maven.publishers.redeploy_publishers.len(), 1);
        assert_eq!(
            maven.publishers.redeploy_publishers[0].url,
            "https://nexus.example.com/content/repositories/releases"
        );
    }

    #[test]
    fn maven_scm_lists_preserve_configuration_order() {
        let config = parse_config(MAVEN_CONFIG).unwrap();
        let scm = config.scm();
        assert!(scm.is_git());
        assert_eq!(
            scm.git_urls(),
            vec![
                "git@github.example.com:platform/deployer.git",
                "git@mirror.example.com:platform/deployer.git",
            ]
        );
        assert_eq!(scm.branch_specs(), vec!["*/master", "*/release"]);
    }

    #[test]
    fn freestyle_document_decodes_to_freestyle_variant() {
        let config = parse_config(FREESTYLE_CONFIG).unwrap();
        assert_eq!(config.job_type(), crate::types::JobType::Freestyle);
        assert_eq!(
            config.scm().git_urls(),
            vec!["git@github.example.com:platform/website.git"]
        );
        assert_eq!(config.scm().branch_specs(), vec!["*/develop"]);
    }

    #[test]
    fn minimal_freestyle_document_is_valid() {
        let config = parse_config("<project/>").unwrap();
        assert_eq!(config.job_type(), crate::types::JobType::Freestyle);
        assert!(config.scm().git_urls().is_empty());
        assert!(config.scm().branch_specs().is_empty());
    }

    #[test]
    fn non_git_scm_yields_empty_lists() {
        let raw = r#"<project>
  <scm class="hudson.scm.SubversionSCM">
    <locations/>
  </scm>
</project>"#;
        let config = parse_config(raw).unwrap();
        assert!(!config.scm().is_git());
        assert!(config.scm().git_urls().is_empty());
        assert!(config.scm().branch_specs().is_empty());
    }

    #[test]
    fn unknown_root_element_is_unrecognized() {
        let raw = "<matrix-project><scm class=\"hudson.scm.NullSCM\"/></matrix-project>";
        match parse_config(raw) {
            Err(Error::UnrecognizedSchema(reason)) => {
                assert!(reason.contains("matrix-project"));
            }
            other => panic!("expected UnrecognizedSchema, got {other:?}"),
        }
    }

    #[test]
    fn garbage_input_is_unrecognized() {
        assert!(matches!(
            parse_config("this is not xml"),
            Err(Error::UnrecognizedSchema(_))
        ));
        assert!(matches!(
            parse_config(""),
            Err(Error::UnrecognizedSchema(_))
        ));
    }

    #[test]
    fn malformed_body_under_known_root_is_a_decode_error() {
        let raw = "<maven2-moduleset><scm class=</maven2-moduleset>";
        assert!(matches!(parse_config(raw), Err(Error::Decode(_))));
    }
}
