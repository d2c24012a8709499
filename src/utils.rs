///! Some utility functions

use std::io::{stdin, stdout, Write};

use crate::task::Task;

/// Print the task list, one row per task, in display (= insertion) order.
///
/// This is a pure projection of the list: it reads a snapshot and mutates nothing.
pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks yet.");
        return;
    }

    for task in tasks {
        println!(
            "  {}\t{} — {} ({} - {})\t[{}]",
            task.id(),
            task.title(),
            task.date().format("%Y-%m-%d"),
            task.start_time().format("%H:%M"),
            task.end_time().format("%H:%M"),
            task.category(),
        );
    }
}

/// Ask the user to paste a line (e.g. the URL they were redirected to after login)
pub fn prompt_line(message: &str) -> std::io::Result<String> {
    print!("{}", message);
    stdout().flush()?;

    let mut line = String::new();
    stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
