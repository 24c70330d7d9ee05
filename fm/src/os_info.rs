//! Static facts about the host for `os --<flag>`

use std::env;

/// Answer for `flag`, or `None` when the flag is unknown.
pub fn lookup(flag: &str) -> Option<String> {
    match flag {
        "EOL" => Some(end_of_line()),
        "cpus" => Some(cpus()),
        "homedir" => Some(
            dirs::home_dir()
                .map(|home| home.display().to_string())
                .unwrap_or_default(),
        ),
        "username" => Some(system_username()),
        "architecture" => Some(env::consts::ARCH.to_string()),
        _ => None,
    }
}

/// The platform line ending, escaped so it is visible.
fn end_of_line() -> String {
    if cfg!(windows) {
        "\\r\\n".to_string()
    } else {
        "\\n".to_string()
    }
}

/// Name of the account running the process.
pub fn system_username() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[derive(Debug, Clone, PartialEq)]
struct CpuInfo {
    model: String,
    mhz: Option<f64>,
}

fn cpus() -> String {
    let mut cpus = read_cpuinfo();
    if cpus.is_empty() {
        let count = std::thread::available_parallelism().map_or(1, |n| n.get());
        cpus = vec![
            CpuInfo {
                model: "unknown".to_string(),
                mhz: None,
            };
            count
        ];
    }
    format_cpus(&cpus)
}

fn format_cpus(cpus: &[CpuInfo]) -> String {
    let mut out = format!("{} cores:", cpus.len());
    for (i, cpu) in cpus.iter().enumerate() {
        match cpu.mhz {
            Some(mhz) => out.push_str(&format!("\n{i}:\t\"{}\"\t{:.2} GHz", cpu.model, mhz / 1000.0)),
            None => out.push_str(&format!("\n{i}:\t\"{}\"", cpu.model)),
        }
    }
    out
}

#[cfg(target_os = "linux")]
fn read_cpuinfo() -> Vec<CpuInfo> {
    std::fs::read_to_string("/proc/cpuinfo")
        .map(|content| parse_cpuinfo(&content))
        .unwrap_or_default()
}

#[cfg(not(target_os = "linux"))]
fn read_cpuinfo() -> Vec<CpuInfo> {
    Vec::new()
}

/// One entry per `processor` block of `/proc/cpuinfo`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpuinfo(content: &str) -> Vec<CpuInfo> {
    let mut cpus = Vec::new();
    for block in content.split("\n\n") {
        let mut model = None;
        let mut mhz = None;
        for line in block.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            match key.trim() {
                "model name" => model = Some(value.trim().to_string()),
                "cpu MHz" => mhz = value.trim().parse().ok(),
                _ => {}
            }
        }
        if let Some(model) = model {
            cpus.push(CpuInfo { model, mhz });
        }
    }
    cpus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_has_no_answer() {
        assert_eq!(lookup("kernel"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn architecture_matches_build_target() {
        assert_eq!(lookup("architecture").unwrap(), env::consts::ARCH);
    }

    #[test]
    fn cpus_header_counts_cores() {
        let answer = lookup("cpus").unwrap();
        assert!(answer.contains(" cores:"));
    }

    #[test]
    fn cpuinfo_blocks_are_parsed() {
        let content = "processor\t: 0\nmodel name\t: Test CPU\ncpu MHz\t\t: 2400.000\n\n\
                       processor\t: 1\nmodel name\t: Test CPU\ncpu MHz\t\t: 1200.000\n";
        let cpus = parse_cpuinfo(content);
        assert_eq!(cpus.len(), 2);
        assert_eq!(cpus[0].model, "Test CPU");
        assert_eq!(
            format_cpus(&cpus),
            "2 cores:\n0:\t\"Test CPU\"\t2.40 GHz\n1:\t\"Test CPU\"\t1.20 GHz"
        );
    }
}
