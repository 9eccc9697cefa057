//! Template source classification
//!
//! A template source string either names a repository on a known git host
//! (in any of the usual shortcut, scp-like or URL spellings) or a local
//! directory. [`TemplateSource::classify`] is the single decision point.
//!
//! ```
//! use stencil_projects::source::{TemplateSource, Transport};
//!
//! let source = TemplateSource::classify("git@github.com:acme/starter.git#v2");
//! let TemplateSource::Hosted(hosted) = source else { panic!("expected hosted source") };
//! assert_eq!(hosted.transport(), Transport::Ssh);
//! assert_eq!(hosted.clone_url(), "git@github.com:acme/starter.git");
//! assert_eq!(hosted.committish(), Some("v2"));
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

/// scp-like ssh spelling: `[user@]host:path`
static SCP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9_.-]+@)?([A-Za-z0-9.-]+):([^/].*)$").expect("scp regex is valid")
});

/// Bare `owner/repo` shortcut
static SHORTCUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*/[A-Za-z0-9_.-]+$").expect("shortcut regex is valid")
});

/// Allowed characters in an owner, group or project path segment
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("segment regex is valid"));

/// Known git hosting services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GitHost {
    GitHub,
    GitLab,
    Bitbucket,
}

impl GitHost {
    /// Canonical domain of the host
    pub fn domain(&self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
        }
    }

    /// Shortcut prefix, as in `github:owner/repo`
    pub fn shortcut_prefix(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
        }
    }

    fn all() -> [Self; 3] {
        [Self::GitHub, Self::GitLab, Self::Bitbucket]
    }

    fn from_domain(domain: &str) -> Option<Self> {
        let domain = domain.to_ascii_lowercase();
        let domain = domain.strip_prefix("www.").unwrap_or(&domain);
        Self::all().into_iter().find(|host| host.domain() == domain)
    }

    fn from_shortcut_prefix(prefix: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|host| host.shortcut_prefix() == prefix)
    }

    /// GitLab allows nested groups (`group/subgroup/project`)
    fn allows_nested_owner(&self) -> bool {
        matches!(self, Self::GitLab)
    }
}

impl fmt::Display for GitHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

/// How a hosted reference was spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Representation {
    /// `owner/repo` or `github:owner/repo`
    Shortcut,
    /// `git@github.com:owner/repo.git`
    Ssh,
    /// `ssh://git@github.com/owner/repo.git` or `git+ssh://...`
    SshUrl,
    /// `https://github.com/owner/repo` or `git+https://...`
    Https,
    /// `git://github.com/owner/repo.git`
    Git,
}

/// Clone transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Ssh,
    Https,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => f.write_str("ssh"),
            Self::Https => f.write_str("https"),
        }
    }
}

/// A repository on a known git host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedGitSource {
    host: GitHost,
    owner: String,
    project: String,
    committish: Option<String>,
    representation: Representation,
}

impl HostedGitSource {
    /// Parse a hosted git reference, returning `None` for anything else
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || looks_like_local_path(input) {
            return None;
        }

        let (body, committish) = match input.split_once('#') {
            Some((body, committish)) => (body, non_empty(committish)),
            None => (input, None),
        };

        let (host, path, representation) = if body.contains("://") {
            parse_url(body)?
        } else if let Some(parsed) = parse_prefixed_shortcut(body) {
            parsed
        } else if let Some(caps) = SCP_RE.captures(body) {
            let host = GitHost::from_domain(&caps[1])?;
            (host, caps[2].to_string(), Representation::Ssh)
        } else if SHORTCUT_RE.is_match(body) {
            (GitHost::GitHub, body.to_string(), Representation::Shortcut)
        } else {
            return None;
        };

        let (owner, project) = split_repo_path(host, &path)?;

        Some(Self {
            host,
            owner,
            project,
            committish,
            representation,
        })
    }

    /// Hosting service
    pub fn host(&self) -> GitHost {
        self.host
    }

    /// Owner (user, organization, or GitLab group path)
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name without `.git`
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Branch, tag or commit following `#`, if any
    pub fn committish(&self) -> Option<&str> {
        self.committish.as_deref()
    }

    /// Spelling the reference was written in
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Preferred clone transport, following the spelling of the reference
    pub fn transport(&self) -> Transport {
        match self.representation {
            Representation::Ssh | Representation::SshUrl => Transport::Ssh,
            Representation::Shortcut | Representation::Https | Representation::Git => {
                Transport::Https
            }
        }
    }

    /// Clone URL for the preferred transport, without the committish
    pub fn clone_url(&self) -> String {
        match self.transport() {
            Transport::Ssh => self.ssh_url(),
            Transport::Https => self.https_url(),
        }
    }

    /// `git@host:owner/project.git`
    pub fn ssh_url(&self) -> String {
        format!("git@{}:{}/{}.git", self.host.domain(), self.owner, self.project)
    }

    /// `https://host/owner/project.git`
    pub fn https_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.host.domain(), self.owner, self.project)
    }
}

impl fmt::Display for HostedGitSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}/{}",
            self.host.shortcut_prefix(),
            self.owner,
            self.project
        )?;
        if let Some(committish) = &self.committish {
            write!(f, "#{}", committish)?;
        }
        Ok(())
    }
}

/// Where a template comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Repository on a known git host, cloned with git
    Hosted(HostedGitSource),
    /// Directory on the local filesystem, copied
    Local(Utf8PathBuf),
}

impl TemplateSource {
    /// Classify a source string
    pub fn classify(input: &str) -> Self {
        match HostedGitSource::parse(input) {
            Some(hosted) => Self::Hosted(hosted),
            None => Self::Local(Utf8PathBuf::from(input)),
        }
    }

    /// Short label for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hosted(_) => "hosted-git",
            Self::Local(_) => "local",
        }
    }

    /// The hosted reference, if this is one
    pub fn as_hosted(&self) -> Option<&HostedGitSource> {
        match self {
            Self::Hosted(hosted) => Some(hosted),
            Self::Local(_) => None,
        }
    }

    /// The local path, if this is one
    pub fn as_local(&self) -> Option<&Utf8Path> {
        match self {
            Self::Hosted(_) => None,
            Self::Local(path) => Some(path),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hosted(hosted) => fmt::Display::fmt(hosted, f),
            Self::Local(path) => f.write_str(path.as_str()),
        }
    }
}

/// Explicitly relative, absolute, home-relative or Windows-style paths
fn looks_like_local_path(input: &str) -> bool {
    input.starts_with('.') || input.starts_with('/') || input.starts_with('~') || input.contains('\\')
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_url(body: &str) -> Option<(GitHost, String, Representation)> {
    let (scheme, _) = body.split_once("://")?;
    let representation = match scheme.to_ascii_lowercase().as_str() {
        "https" | "http" | "git+https" | "git+http" => Representation::Https,
        "ssh" | "git+ssh" => Representation::SshUrl,
        "git" => Representation::Git,
        _ => return None,
    };

    let url = Url::parse(body).ok()?;
    let host = GitHost::from_domain(url.host_str()?)?;
    Some((host, url.path().to_string(), representation))
}

fn parse_prefixed_shortcut(body: &str) -> Option<(GitHost, String, Representation)> {
    let (prefix, path) = body.split_once(':')?;
    let host = GitHost::from_shortcut_prefix(prefix)?;
    Some((host, path.to_string(), Representation::Shortcut))
}

/// Split `owner/project(.git)` into its parts, validating every segment
fn split_repo_path(host: GitHost, path: &str) -> Option<(String, String)> {
    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let segments: Vec<&str> = path.split('/').collect();
    let valid = segments
        .iter()
        .all(|s| SEGMENT_RE.is_match(s) && *s != "." && *s != "..");
    if !valid || segments.len() < 2 {
        return None;
    }
    if segments.len() > 2 && !host.allows_nested_owner() {
        return None;
    }

    let (project, owner) = segments.split_last()?;
    Some((owner.join("/"), (*project).to_string()))
}
