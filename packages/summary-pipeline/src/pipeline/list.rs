//! Recursive folder listing.

use std::collections::HashSet;

use tracing::debug;

use super::with_timeout;
use crate::error::{Result, SummaryError};
use crate::traits::drive::DriveSource;
use crate::types::{config::PipelineConfig, document::DriveFile};

/// List every non-folder file below `root_folder_id`.
///
/// Walks the hierarchy depth-first with an explicit stack. Each folder is
/// listed at most once, so shared or cyclic folder links terminate. The
/// first listing error aborts the walk; nothing is retried.
pub async fn list_descendants(
    drive: &dyn DriveSource,
    root_folder_id: &str,
    config: &PipelineConfig,
) -> Result<Vec<DriveFile>> {
    let mut stack = vec![root_folder_id.to_string()];
    let mut visited: HashSet<String> = HashSet::new();
    let mut files = Vec::new();

    while let Some(folder_id) = stack.pop() {
        if !visited.insert(folder_id.clone()) {
            debug!(folder_id = %folder_id, "Skipping already visited folder");
            continue;
        }
        if visited.len() > config.max_folders {
            return Err(SummaryError::TraversalLimit {
                limit: config.max_folders,
            });
        }

        let children = with_timeout(
            "folder listing",
            config.call_timeout,
            drive.list_children(&folder_id),
        )
        .await?;

        let mut subfolders = Vec::new();
        for child in children {
            if child.is_folder() {
                subfolders.push(child.id);
            } else {
                files.push(child);
            }
        }
        // Reverse so the first subfolder is popped first.
        stack.extend(subfolders.into_iter().rev());
    }

    debug!(
        root_folder_id,
        folders = visited.len(),
        files = files.len(),
        "Folder listing complete"
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDrive, MockDriveCall};
    use std::time::Duration;

    fn names(files: &[DriveFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_lists_nested_folders() {
        let drive = MockDrive::new()
            .with_children(
                "root",
                vec![
                    DriveFile::pdf("a", "Cover.pdf"),
                    DriveFile::folder("rfis", "RFIs"),
                    DriveFile::folder("fin", "Financials"),
                ],
            )
            .with_children("rfis", vec![DriveFile::pdf("b", "RFI_001.pdf")])
            .with_children(
                "fin",
                vec![
                    DriveFile::folder("q2", "Q2"),
                    DriveFile::pdf("c", "Budget.pdf"),
                ],
            )
            .with_children("q2", vec![DriveFile::pdf("d", "Forecast_Q2.pdf")]);

        let files = list_descendants(&drive, "root", &PipelineConfig::default())
            .await
            .unwrap();

        assert_eq!(
            names(&files),
            vec!["Cover.pdf", "RFI_001.pdf", "Budget.pdf", "Forecast_Q2.pdf"]
        );
        // One listing call per folder
        let listings = drive
            .calls()
            .into_iter()
            .filter(|c| matches!(c, MockDriveCall::List { .. }))
            .count();
        assert_eq!(listings, 4);
    }

    #[tokio::test]
    async fn test_cycle_terminates() {
        let drive = MockDrive::new()
            .with_children(
                "root",
                vec![DriveFile::folder("a", "A"), DriveFile::pdf("1", "one.pdf")],
            )
            .with_children(
                "a",
                vec![DriveFile::folder("root", "Back to root"), DriveFile::pdf("2", "two.pdf")],
            );

        let files = list_descendants(&drive, "root", &PipelineConfig::default())
            .await
            .unwrap();

        assert_eq!(names(&files), vec!["one.pdf", "two.pdf"]);
        assert_eq!(drive.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_traversal_limit() {
        let drive = MockDrive::new()
            .with_children("root", vec![DriveFile::folder("a", "A")])
            .with_children("a", vec![DriveFile::folder("b", "B")])
            .with_children("b", vec![]);

        let config = PipelineConfig::default().with_max_folders(2);
        let err = list_descendants(&drive, "root", &config).await.unwrap_err();

        assert!(matches!(err, SummaryError::TraversalLimit { limit: 2 }));
    }

    #[tokio::test]
    async fn test_listing_error_propagates() {
        let drive = MockDrive::new()
            .with_children("root", vec![DriveFile::folder("broken", "Broken")])
            .fail_listing("broken");

        let result = list_descendants(&drive, "root", &PipelineConfig::default()).await;
        assert!(matches!(result, Err(SummaryError::Drive(_))));
    }

    #[tokio::test]
    async fn test_listing_timeout() {
        let drive = MockDrive::new()
            .with_children("root", vec![])
            .with_delay(Duration::from_millis(200));

        let config = PipelineConfig::default().with_call_timeout(Duration::from_millis(20));
        let err = list_descendants(&drive, "root", &config).await.unwrap_err();

        assert!(err.is_timeout());
    }
}
