use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

use crate::domain::{BatchEvaluator, Calculator, DomainResult};

pub struct BatchFiles;

impl BatchFiles {
    /// Evaluates every row of the CSV at `input`, writing the result table
    /// to `output`, or to stdout when `output` is `None`.
    pub fn run(calculator: &Calculator, input: &Path, output: Option<&Path>) -> DomainResult<usize> {
        let reader = BufReader::new(File::open(input)?);
        match output {
            Some(path) => BatchEvaluator::run(calculator, reader, BufWriter::new(File::create(path)?)),
            None => BatchEvaluator::run(calculator, reader, io::stdout().lock()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{find_calculator, DomainError};
    use std::fs;

    #[test]
    fn test_batch_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("packs.csv");
        let output = dir.path().join("runtime.csv");
        fs::write(&input, "capacity,current-draw\n2400,100\n0,100\n").unwrap();

        let battery = find_calculator("battery").unwrap();
        let rows = BatchFiles::run(battery, &input, Some(output.as_path())).unwrap();
        assert_eq!(rows, 2);

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "capacity,current-draw,discharge-factor,runtime,runtime-days");
        assert_eq!(lines[1], "2400,100,,24.00,1.00");
        assert_eq!(lines[2], "0,100,,—,—");
    }

    #[test]
    fn test_batch_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let divider = find_calculator("divider").unwrap();
        let result = BatchFiles::run(divider, &dir.path().join("nope.csv"), None);
        assert!(matches!(result, Err(DomainError::Io(_))));
    }
}
