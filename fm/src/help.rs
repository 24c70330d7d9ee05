pub struct CommandHelp {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub options: &'static [(&'static str, &'static str)],
}

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: ".exit",
        summary: "Leave the file manager",
        usage: ".exit",
        options: &[],
    },
    CommandHelp {
        name: "add",
        summary: "Create an empty file",
        usage: "add FILE",
        options: &[],
    },
    CommandHelp {
        name: "cat",
        summary: "Print a file",
        usage: "cat FILE",
        options: &[],
    },
    CommandHelp {
        name: "cd",
        summary: "Change the current directory",
        usage: "cd DIR",
        options: &[],
    },
    CommandHelp {
        name: "compress",
        summary: "Compress a file with Brotli",
        usage: "compress SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "cp",
        summary: "Copy a file",
        usage: "cp SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "decompress",
        summary: "Decompress a Brotli file",
        usage: "decompress SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "hash",
        summary: "Print the SHA-256 digest of a file",
        usage: "hash FILE",
        options: &[],
    },
    CommandHelp {
        name: "help",
        summary: "Show available commands",
        usage: "help [COMMAND]",
        options: &[],
    },
    CommandHelp {
        name: "ls",
        summary: "List the current directory",
        usage: "ls",
        options: &[],
    },
    CommandHelp {
        name: "mv",
        summary: "Move a file (copy, then remove the source)",
        usage: "mv SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "os",
        summary: "Show host information",
        usage: "os --FLAG",
        options: &[
            ("--EOL", "Default end-of-line sequence"),
            ("--cpus", "CPU count and models"),
            ("--homedir", "Home directory"),
            ("--username", "System user name"),
            ("--architecture", "CPU architecture"),
        ],
    },
    CommandHelp {
        name: "rm",
        summary: "Remove a file",
        usage: "rm FILE",
        options: &[],
    },
    CommandHelp {
        name: "rn",
        summary: "Rename a file",
        usage: "rn SOURCE DEST",
        options: &[],
    },
    CommandHelp {
        name: "up",
        summary: "Go to the parent directory",
        usage: "up",
        options: &[],
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn format_help(cmd: &CommandHelp) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n\n", cmd.name, cmd.summary));
    out.push_str(&format!("Usage: {}", cmd.usage));
    if !cmd.options.is_empty() {
        out.push_str("\n\nOptions:");
        for (opt, desc) in cmd.options {
            out.push_str(&format!("\n  {opt:16} {desc}"));
        }
    }
    out
}

pub fn format_help_list() -> String {
    let mut out = String::from("Available commands:\n");
    for cmd in COMMANDS {
        out.push_str(&format!("\n  {:12} {}", cmd.name, cmd.summary));
    }
    out.push_str("\n\nPaths with spaces may be wrapped in single quotes: rn 'old name' 'new name'");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_help() {
        for name in [
            "ls", "up", "cd", "cat", "add", "rm", "rn", "cp", "mv", "hash", "compress",
            "decompress", "os",
        ] {
            assert!(get_help(name).is_some(), "missing help for {name}");
        }
    }

    #[test]
    fn option_table_is_rendered() {
        let text = format_help(get_help("os").unwrap());
        assert!(text.starts_with("os - Show host information"));
        assert!(text.contains("--homedir"));
    }
}
