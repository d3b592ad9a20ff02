//! `completions` and `man`: artifacts generated from the clap definition.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::Cli;

const BIN_NAME: &str = "authorship";

fn completion_script(shell: clap_complete::Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut out);
    out
}

fn main_man_page() -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut out)?;
    Ok(out)
}

/// Write `authorship.1` plus one page per subcommand into `dir`.
fn write_man_pages(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    clap_mangen::generate_to(Cli::command(), dir)
}

pub(crate) fn handle_completions(
    shell: clap_complete::Shell,
) -> Result<(), Box<dyn std::error::Error>> {
    std::io::stdout().write_all(&completion_script(shell))?;
    Ok(())
}

pub(crate) fn handle_man(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output {
        write_man_pages(&dir)?;
        eprintln!("Generated man pages in: {}", dir.display());
    } else {
        std::io::stdout().write_all(&main_man_page()?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn completion_script_names_binary_and_subcommands() {
        let script = String::from_utf8(completion_script(clap_complete::Shell::Bash))
            .expect("completion output should be UTF-8");
        assert!(script.contains(BIN_NAME));
        assert!(script.contains("scan"));
    }

    #[test]
    fn main_man_page_has_title() {
        let page = String::from_utf8(main_man_page().expect("man rendering should succeed"))
            .expect("man output should be UTF-8");
        assert!(page.to_lowercase().contains(".th authorship"));
    }

    #[test]
    fn man_pages_cover_subcommands() {
        let nonce = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock should be after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("authorship-man-test-{nonce}"));

        write_man_pages(&dir).expect("man page generation should succeed");

        assert!(dir.join("authorship.1").exists());
        assert!(dir.join("authorship-scan.1").exists());

        std::fs::remove_dir_all(&dir).expect("test output directory should be removable");
    }
}
