use std::path::Path;

use docver_core::{DocVersion, PurgeOptions, plan, sort_descending};
use docver_tree::{DocsPaths, DocsTree, display_label, remove_builds};

use crate::cli::PurgeArgs;
use crate::config::Options;
use crate::error::CliError;
use crate::prompt;

fn purge_options(args: &PurgeArgs, options: &Options) -> PurgeOptions {
    let (major, minor, patch) = args.quotas();
    PurgeOptions {
        targets: args.versions.clone(),
        exclude: args.exclude.clone(),
        major,
        minor,
        patch,
        stale: args.stale(),
        include_prerelease: args.prerelease,
        aliases: options.aliases.clone(),
    }
}

fn listing(header: &str, paths: &DocsPaths, versions: &[DocVersion], base: &Path) -> String {
    let mut lines = vec![header.to_string()];
    lines.extend(
        versions
            .iter()
            .map(|version| format!("- {}", display_label(&paths.version_dir(version), base))),
    );
    lines.join("\n")
}

pub async fn run(args: &PurgeArgs) -> Result<(), CliError> {
    let options = Options::resolve(&args.common)?;
    let tree = DocsTree::open(&options.out)?;
    let versions = tree.versions()?;
    log::debug!("Found {} builds in {}", versions.len(), options.out.display());

    let planned = plan(&versions, &purge_options(args, &options), &tree);
    if planned.is_empty() {
        println!("Nothing to purge!");
        return Ok(());
    }

    let mut pending = planned.into_versions();
    sort_descending(&mut pending);

    let header = if args.common.yes {
        "Purging:"
    } else {
        "Pending purge:"
    };
    let cwd = std::env::current_dir()?;
    println!("{}", listing(header, tree.paths(), &pending, &cwd));

    if !args.common.yes && !prompt::confirm("Purge docs for these versions?")? {
        return Ok(());
    }

    let removals = remove_builds(tree.paths(), &pending).await;
    let failed: Vec<_> = removals.iter().filter(|removal| !removal.is_ok()).collect();
    for removal in &failed {
        if let Err(error) = &removal.result {
            eprintln!("{error}");
        }
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::PurgeFailed {
            failed: failed.len(),
            total: removals.len(),
        })
    }
}
