use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdout; anything but an explicit yes declines.
///
/// # Errors
/// Returns an error if stdout or stdin fails.
pub fn confirm(message: &str) -> io::Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout().lock(), message)
}

fn confirm_with(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> io::Result<bool> {
    write!(output, "{message} (y/N) ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    writeln!(output)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::confirm_with;

    fn answer(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = confirm_with(&mut input.as_bytes(), &mut output, "Continue?")
            .expect("prompt should not fail");
        (
            confirmed,
            String::from_utf8(output).expect("prompt output should be utf-8"),
        )
    }

    #[test]
    fn explicit_yes_confirms() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(answer("  yes  \n").0);
    }

    #[test]
    fn anything_else_declines() {
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("").0);
        assert!(!answer("sure\n").0);
    }

    #[test]
    fn prompt_shows_default() {
        assert_eq!(answer("y\n").1, "Continue? (y/N) \n");
    }
}
