//! Run summary reporting.

use console::style;

use crate::collect::CollectState;
use crate::output::console::print_warning;

/// Print the end-of-run summary with counters and any warnings.
pub fn print_run_summary(state: &CollectState) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Analysis summary for @{}:", state.target_username)).bold()
    );
    println!("  Followers collected: {}", state.followers_collected);
    println!("  Posts collected:     {}", state.posts_collected);
    println!("  Likes collected:     {}", state.likes_collected);
    println!("  Follower pages:      {}", state.pages_fetched);
    if state.followers_degraded > 0 {
        println!(
            "  Incomplete profiles: {}",
            style(state.followers_degraded).yellow()
        );
    }
    println!("  Duration:            {:.1}s", state.elapsed_secs());

    if !state.warnings.is_empty() {
        println!();
        println!(
            "{}",
            style(format!("Warnings ({}):", state.warnings.len())).yellow().bold()
        );
        for warning in &state.warnings {
            print_warning(&format!("@{}: {}", warning.subject, warning.message));
        }
    }
    println!("{}", style("═".repeat(50)).dim());
}
