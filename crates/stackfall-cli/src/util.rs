use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::Path,
};

use anyhow::Context;

enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>),
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File(writer) => writer.flush(),
        }
    }
}

/// Writes `value` as pretty JSON to `output_path`, or to stdout without one.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let (mut output, target) = match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Output::File(BufWriter::new(file)), path.display().to_string())
        }
        None => (Output::Stdout(io::stdout().lock()), "stdout".to_string()),
    };

    serde_json::to_writer_pretty(&mut output, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(output)
        .and_then(|()| output.flush())
        .with_context(|| format!("Failed to flush output to {target}"))?;
    Ok(())
}

/// Reads and deserializes a JSON file, naming `file_kind` in error messages.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))?;

    Ok(value)
}
