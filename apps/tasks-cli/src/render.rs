//! Human readable output for command replies.

use std::fmt;

use rpc::tasks::v1::Task;

/// What a successful command prints.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Tasks(Vec<Task>),
    Added(Task),
    Completed(Task),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Tasks(tasks) => write_list(f, tasks),
            Output::Added(task) => {
                writeln!(f, "--- Task Added Successfully ---")?;
                writeln!(f, "ID: {}", task.id)?;
                writeln!(f, "Title: {}", task.title)?;
                writeln!(f, "Description: {}", task.description)?;
                writeln!(f, "Status: {}", task.status)?;
                writeln!(f, "Created At: {}", task.created_at)?;
                writeln!(f, "Updated At: {}", task.updated_at)?;
                writeln!(f, "-----------------------------")
            }
            Output::Completed(task) => {
                writeln!(f, "--- Task Completed Successfully ---")?;
                writeln!(f, "ID: {}", task.id)?;
                writeln!(f, "Title: {}", task.title)?;
                writeln!(f, "Status: {}", task.status)?;
                writeln!(f, "Updated At: {}", task.updated_at)?;
                writeln!(f, "-------------------------------")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, tasks: &[Task]) -> fmt::Result {
    if tasks.is_empty() {
        return writeln!(f, "No tasks found.");
    }

    writeln!(f, "--- Tasks ---")?;
    for (i, task) in tasks.iter().enumerate() {
        writeln!(f, "{}. ID: {}", i + 1, task.id)?;
        writeln!(f, "   Title: {}", task.title)?;
        writeln!(f, "   Description: {}", task.description)?;
        writeln!(f, "   Status: {}", task.status)?;
        writeln!(f, "   Created At: {}", task.created_at)?;
        writeln!(f, "   Updated At: {}", task.updated_at)?;
        writeln!(f, "---------------")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, title: &str, status: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            status: status.to_string(),
            created_at: "2025-01-01T10:00:00.000000Z".to_string(),
            updated_at: "2025-01-01T10:05:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(Output::Tasks(vec![]).to_string(), "No tasks found.\n");
    }

    #[test]
    fn test_list_is_numbered_from_one() {
        let output = Output::Tasks(vec![
            task("2", "Walk dog", "pending"),
            task("1", "Buy milk", "completed"),
        ])
        .to_string();

        let expected = "\
--- Tasks ---
1. ID: 2
   Title: Walk dog
   Description: 
   Status: pending
   Created At: 2025-01-01T10:00:00.000000Z
   Updated At: 2025-01-01T10:05:00.000000Z
---------------
2. ID: 1
   Title: Buy milk
   Description: 
   Status: completed
   Created At: 2025-01-01T10:00:00.000000Z
   Updated At: 2025-01-01T10:05:00.000000Z
---------------
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_added_block() {
        let output = Output::Added(task("1", "Buy milk", "pending")).to_string();

        assert!(output.starts_with("--- Task Added Successfully ---\nID: 1\nTitle: Buy milk\n"));
        assert!(output.contains("Status: pending\n"));
        assert!(output.contains("Created At: 2025-01-01T10:00:00.000000Z\n"));
    }

    #[test]
    fn test_completed_block_omits_description_and_created_at() {
        let output = Output::Completed(task("1", "Buy milk", "completed")).to_string();

        assert!(output.starts_with("--- Task Completed Successfully ---\n"));
        assert!(output.contains("Status: completed\n"));
        assert!(output.contains("Updated At: 2025-01-01T10:05:00.000000Z\n"));
        assert!(!output.contains("Description"));
        assert!(!output.contains("Created At"));
    }
}
