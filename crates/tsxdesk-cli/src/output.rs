use std::io::Write;

use crate::cli::OutputFormat;
use crate::commands::CommandOutput;
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_output(&mut handle, output, format, pretty)?;
    handle.flush()?;
    Ok(())
}

pub fn write_output<W: Write>(
    writer: &mut W,
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(&output.data)?
            } else {
                serde_json::to_string(&output.data)?
            };
            writeln!(writer, "{payload}")?;
        }
        OutputFormat::Table => {
            write!(writer, "{}", output.text)?;
            if !output.text.ends_with('\n') {
                writeln!(writer)?;
            }
        }
    }

    Ok(())
}
