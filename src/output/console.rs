//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     X Follower Analyzer                               ║
║     Follower profiles, posts, and likes               ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print the resolved run configuration.
pub fn print_config_summary(
    target: &str,
    max_followers: usize,
    max_posts: usize,
    max_likes: usize,
    output_format: &str,
    output_path: &str,
    rate_limit_delay: f64,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Target account:   @{}", target);
    println!("  Max followers:    {}", max_followers);
    println!("  Max posts/user:   {}", max_posts);
    println!("  Max likes/user:   {}", max_likes);
    println!("  Output format:    {}", output_format);
    println!("  Output file:      {}", output_path);
    println!("  Rate limit delay: {}s", rate_limit_delay);
    println!();
}
