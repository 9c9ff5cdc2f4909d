use std::fs;
use std::io::{self, Write};
use std::str::FromStr;

use crate::config::DemoConfig;
use crate::requests::LinkedQueue;
use crate::utils::file::TextFileHandler;
use crate::utils::matrix::{self, Matrix, MatrixError};

pub const DEMO_REQUESTS: [&str; 4] = [
    "Request 1: authorization",
    "Request 2: file upload",
    "Request 3: password change",
    "Request 4: account deletion",
];

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("output failed: {0}")]
    Io(#[from] io::Error),

    #[error("matrix demo failed: {0}")]
    Matrix(#[from] MatrixError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    File,
    Matrix,
    Queue,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::File, Demo::Matrix, Demo::Queue];
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Demo::File),
            "matrix" => Ok(Demo::Matrix),
            "queue" => Ok(Demo::Queue),
            other => Err(format!("unknown demo '{}', expected file, matrix or queue", other)),
        }
    }
}

pub fn run<W: Write>(demo: Demo, cfg: &DemoConfig, out: &mut W) -> Result<(), DemoError> {
    tracing::info!(?demo, "running demo");
    match demo {
        Demo::File => file_demo(cfg, out),
        Demo::Matrix => matrix_demo(cfg, out),
        Demo::Queue => queue_demo(out),
    }
}

/// Runs each demo in order with a blank line after each one, stopping at the
/// first failure, output errors included.
pub fn run_all<W: Write>(demos: &[Demo], cfg: &DemoConfig, out: &mut W) -> Result<(), DemoError> {
    for &demo in demos {
        run(demo, cfg, out)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Seeds the data file, breaks the handler's path and reads, so the failure
/// ends up in the log file which is then printed back.
pub fn file_demo<W: Write>(cfg: &DemoConfig, out: &mut W) -> Result<(), DemoError> {
    fs::write(&cfg.data_file, "test")?;

    let outcome = match TextFileHandler::new(&cfg.data_file) {
        Ok(handler) => {
            let mut handler = handler.with_log_path(&cfg.log_file);
            handler.path = cfg.broken_path.clone();
            writeln!(out, "Attempting to read (should cause an error and be logged to file)...")?;
            handler.read()
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(content) => writeln!(out, "Unexpectedly read: {}", content)?,
        Err(e) => writeln!(out, "\n[{}] {}", e.kind_name(), e)?,
    }

    if cfg.log_file.exists() {
        writeln!(out, "\nFile '{}' successfully created!", cfg.log_file.display())?;
        let content = fs::read_to_string(&cfg.log_file)?;
        writeln!(out, "--- {} content ---", cfg.log_file.display())?;
        writeln!(out, "{}", content)?;
        writeln!(out, "-----------------------")?;
    } else {
        writeln!(out, "\nFile '{}' was not created.", cfg.log_file.display())?;
    }
    Ok(())
}

fn print_matrix<W: Write>(out: &mut W, m: &Matrix) -> io::Result<()> {
    for row in m {
        writeln!(out, "{:?}", row)?;
    }
    Ok(())
}

pub fn matrix_demo<W: Write>(cfg: &DemoConfig, out: &mut W) -> Result<(), DemoError> {
    let mut m = match cfg.matrix_size {
        Some(n) => matrix::random_matrix(n, n, -100, 100),
        None => matrix::demo_matrix(),
    };

    writeln!(out, "Initial matrix:")?;
    print_matrix(out, &m)?;

    matrix::bubble_sort_columns(&mut m)?;

    writeln!(out, "Matrix after sorting columns:")?;
    print_matrix(out, &m)?;

    let summary = matrix::summarize(&m)?;
    writeln!(out, "Row geometric means:")?;
    for (i, value) in summary.row_means.iter().enumerate() {
        writeln!(out, "f({}) = {}", i + 1, value)?;
    }
    writeln!(out, "Arithmetic mean of f(i): {}", summary.mean_of_means)?;

    tracing::debug!(summary = %summary.to_json(), "matrix summary");
    Ok(())
}

pub fn queue_demo<W: Write>(out: &mut W) -> Result<(), DemoError> {
    let mut queue: LinkedQueue<&str> = DEMO_REQUESTS.into_iter().collect();

    writeln!(out, "Current queue:")?;
    write!(out, "{}", queue.show())?;

    writeln!(out, "Processing requests:")?;
    while let Some(req) = queue.dequeue() {
        writeln!(out, "Processed: {}", req)?;
    }
    Ok(())
}
