use docver_core::BuildLookup;
use docver_tree::{
    DocsTree, LabelledDiff, Metadata, make_symlinks, pending_changes, unlink_broken_symlinks,
};

use crate::cli::SyncArgs;
use crate::config::{Options, package_version};
use crate::error::CliError;
use crate::prompt;

fn render_changes(header: &str, changes: &[LabelledDiff]) -> String {
    let body = changes
        .iter()
        .map(|change| format!("{}:\n{}", change.label, change.diff))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{header}\n\n{body}")
}

pub fn run(args: &SyncArgs) -> Result<(), CliError> {
    let options = Options::resolve(&args.common)?;
    let tree = DocsTree::open(&options.out)?;
    let paths = tree.paths();

    let current = Metadata::load(paths);
    let refreshed = Metadata::refresh(tree.versions()?, &options.aliases);

    let cwd = std::env::current_dir()?;
    let package = package_version(&cwd.join(&args.package))?;
    if !tree.has_build(&package) {
        return Err(CliError::MissingPackageDocs {
            version: package.to_string(),
        });
    }

    let changes = pending_changes(paths, &current, &refreshed, &cwd)?;
    if changes.is_empty() && !args.symlinks {
        println!("Already up-to-date.");
        return Ok(());
    }

    let mut symlinks = args.symlinks;
    if !changes.is_empty() {
        let header = if args.common.yes {
            "Synchronizing:"
        } else {
            "Pending synchronization:"
        };
        println!("{}", render_changes(header, &changes));

        if args.common.yes || prompt::confirm("Apply pending synchronizations?")? {
            for change in &changes {
                change.save()?;
                log::info!("Updated {}", change.label);
            }
            symlinks = true;
        }
    }

    if symlinks {
        let linked = make_symlinks(paths, &refreshed)?;
        let unlinked = unlink_broken_symlinks(paths.out())?;
        log::info!(
            "Refreshed {} symlinks, removed {} broken ones",
            linked.len(),
            unlinked.len()
        );
    }

    Ok(())
}
