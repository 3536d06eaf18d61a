// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Chronopick v{} - calendar and time picker engines (playground)",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--config <file>] [--verbose]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -c, --config <file>   Read configuration from this TOML file.");
    println!("    -v, --verbose         Log at debug level regardless of the config.");
    println!("    -h, --help            Show this help message.");
    println!();
    print_commands();
}

pub fn print_commands() {
    println!("CALENDAR COMMANDS:");
    println!("    show                  Print the header and the current grid");
    println!("    json                  Print the current grid as JSON");
    println!("    next | prev           Move one month forward / back");
    println!("    next-year | prev-year Move one year forward / back");
    println!("    months | years | days Switch view mode");
    println!("    month <1-12>          Pick a month (returns to the days view)");
    println!("    year <YYYY>           Pick a year (returns to the days view)");
    println!("    day <YYYY-MM-DD>      Pick a day (two picks form a range)");
    println!("    page <+N|-N>          Page the year grid");
    println!("    header <action>       prev-month, next-month, prev-year, next-year,");
    println!("                          month, year, month-year");
    println!();
    println!("TIME PICKER COMMANDS:");
    println!("    type <text>           Propose new buffer contents (as if typed)");
    println!("    key <chars>           Type characters one at a time");
    println!("    commit                Commit the buffer");
    println!("    popup                 Toggle the time dial");
    println!("    dial <h|m|s> <+N|-N>  Step a dial segment");
    println!("    ok | cancel           Confirm or dismiss the dial");
    println!();
    println!("    help                  Show this list");
    println!("    quit                  Exit");
}
