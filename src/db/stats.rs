use crate::db::repository::DocumentStats;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

/// Print file size and document counters for `db --info`.
pub fn print_db_info(db_path: &str, stats: &DocumentStats) {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!(
        "{}• Document:{} {:.2} KB",
        CYAN, RESET, stats.size_kb
    );

    let count = |n: usize| {
        if n == 0 {
            format!("{GREY}0{RESET}")
        } else {
            format!("{GREEN}{n}{RESET}")
        }
    };
    println!("{}• Workers:{} {}", CYAN, RESET, count(stats.workers));
    println!("{}• Supervisors:{} {}", CYAN, RESET, count(stats.supervisors));
    println!("{}• Log entries:{} {}", CYAN, RESET, count(stats.logs));

    println!();
}
