use std::io::Write;

/// First line of the report when at least one address was found
pub const REPORT_HEADER: &str = "Found these email addresses:";

/// Writes the email report
///
/// Prints the header followed by one address per line. Nothing at all is
/// written when no addresses were found.
///
/// # Example
///
/// ```
/// use mail_ripple::output::write_email_report;
///
/// let mut out = Vec::new();
/// write_email_report(&mut out, ["a@b.co"]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Found these email addresses:\na@b.co\n");
/// ```
pub fn write_email_report<W, I, S>(writer: &mut W, emails: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut emails = emails.into_iter().peekable();
    if emails.peek().is_none() {
        return Ok(());
    }

    writeln!(writer, "{}", REPORT_HEADER)?;
    for email in emails {
        writeln!(writer, "{}", email.as_ref())?;
    }
    writer.flush()
}
