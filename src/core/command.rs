//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Employees,
    Departments,
    Analytics,

    // Data commands
    Refresh,
    Top(Option<u32>),
    Insights,
    DeptStats,
    Audit(Option<u32>),
    SalaryStats,
    Growth(Option<u32>),
    Export,

    // Application
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "employees" | "emp" => Command::Employees,
        "departments" | "dept" => Command::Departments,
        "analytics" | "stats" => Command::Analytics,

        // Data
        "refresh" | "r" => Command::Refresh,
        "top" => match parse_count(args) {
            Some(limit) => Command::Top(limit),
            None => Command::Unknown(input.to_string()),
        },
        "insights" | "salary" => Command::Insights,
        "dstats" => Command::DeptStats,
        "audit" => match parse_count(args) {
            Some(days) => Command::Audit(days),
            None => Command::Unknown(input.to_string()),
        },
        "salstats" | "payroll" => Command::SalaryStats,
        "growth" => match parse_count(args) {
            Some(months) => Command::Growth(months),
            None => Command::Unknown(input.to_string()),
        },
        "export" => Command::Export,

        // Application
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

/// `None` when the argument is present but not a number
fn parse_count(args: Option<&str>) -> Option<Option<u32>> {
    match args {
        None => Some(None),
        Some(raw) => raw.parse::<u32>().ok().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("employees"), Command::Employees);
        assert_eq!(parse_command("emp"), Command::Employees);
        assert_eq!(parse_command("DEPT"), Command::Departments);
        assert_eq!(parse_command("  analytics "), Command::Analytics);
    }

    #[test]
    fn test_parse_data_commands() {
        assert_eq!(parse_command("top"), Command::Top(None));
        assert_eq!(parse_command("top 10"), Command::Top(Some(10)));
        assert_eq!(parse_command("salary"), Command::Insights);
        assert_eq!(parse_command("dstats"), Command::DeptStats);
        assert_eq!(parse_command("audit"), Command::Audit(None));
        assert_eq!(parse_command("audit 90"), Command::Audit(Some(90)));
        assert_eq!(parse_command("r"), Command::Refresh);
        assert_eq!(parse_command("export"), Command::Export);
        assert_eq!(parse_command("salstats"), Command::SalaryStats);
        assert_eq!(parse_command("payroll"), Command::SalaryStats);
        assert_eq!(parse_command("growth"), Command::Growth(None));
        assert_eq!(parse_command("growth 24"), Command::Growth(Some(24)));
    }

    #[test]
    fn test_parse_bad_numbers() {
        assert_eq!(
            parse_command("top many"),
            Command::Unknown("top many".to_string())
        );
        assert_eq!(
            parse_command("audit -3"),
            Command::Unknown("audit -3".to_string())
        );
        assert_eq!(
            parse_command("growth 1.5"),
            Command::Unknown("growth 1.5".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }
}
