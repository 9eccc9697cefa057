//! Inspect command

use anyhow::Result;
use serde_json::json;
use stencil_projects::TemplateSource;

use crate::cli::InspectArgs;
use crate::output;

pub fn run(args: InspectArgs) -> Result<()> {
    let source = TemplateSource::classify(&args.source);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&describe(&source))?);
        return Ok(());
    }

    output::header("Template source");
    output::kv("Input", &args.source);
    output::kv("Kind", source.kind());

    match &source {
        TemplateSource::Hosted(hosted) => {
            output::kv("Host", hosted.host().domain());
            output::kv("Owner", hosted.owner());
            output::kv("Project", hosted.project());
            output::kv("Ref", hosted.committish().unwrap_or("(default branch)"));
            output::kv("Transport", &hosted.transport().to_string());
            output::kv("Clone URL", &hosted.clone_url());
        }
        TemplateSource::Local(path) => {
            let state = if path.is_dir() {
                "directory"
            } else if path.exists() {
                "not a directory"
            } else {
                "missing"
            };
            output::kv("Path", path.as_str());
            output::kv("State", state);
        }
    }

    Ok(())
}

fn describe(source: &TemplateSource) -> serde_json::Value {
    match source {
        TemplateSource::Hosted(hosted) => json!({
            "kind": source.kind(),
            "host": hosted.host().domain(),
            "owner": hosted.owner(),
            "project": hosted.project(),
            "committish": hosted.committish(),
            "representation": hosted.representation(),
            "transport": hosted.transport(),
            "clone_url": hosted.clone_url(),
            "ssh_url": hosted.ssh_url(),
            "https_url": hosted.https_url(),
        }),
        TemplateSource::Local(path) => json!({
            "kind": source.kind(),
            "path": path.as_str(),
            "exists": path.exists(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_hosted() {
        let value = describe(&TemplateSource::classify("gitlab:group/sub/app#main"));
        assert_eq!(value["kind"], "hosted-git");
        assert_eq!(value["host"], "gitlab.com");
        assert_eq!(value["committish"], "main");
        assert_eq!(value["clone_url"], "https://gitlab.com/group/sub/app.git");
    }

    #[test]
    fn test_describe_local() {
        let value = describe(&TemplateSource::classify("./no-such-template"));
        assert_eq!(value["kind"], "local");
        assert_eq!(value["path"], "./no-such-template");
        assert_eq!(value["exists"], false);
    }
}
