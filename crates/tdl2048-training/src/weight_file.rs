//! Binary weight file.
//!
//! Layout, all little-endian:
//!
//! ```text
//! u32                table count
//! repeated per table:
//!   u64              entry count
//!   f32 × count      weights
//! ```
//!
//! Tables are stored in pattern order. A file whose table count or entry
//! counts do not match the network it is loaded into is rejected before any
//! weight is read into the network.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use byteorder::{LE, ReadBytesExt as _, WriteBytesExt as _};
use tdl2048_evaluator::{
    n_tuple::{FEATURE_SPACE, TuplePattern},
    network::{NTupleNetwork, NetworkShapeError, WeightTable},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum WeightFileError {
    #[display("I/O error: {_0}")]
    Io(io::Error),
    #[display("{_0}")]
    Shape(NetworkShapeError),
}

/// Reads a network whose tables follow `patterns`.
pub fn read_network<R>(
    reader: &mut R,
    patterns: Vec<TuplePattern>,
) -> Result<NTupleNetwork, WeightFileError>
where
    R: Read,
{
    let count = reader.read_u32::<LE>()?;
    if usize::try_from(count).ok() != Some(patterns.len()) {
        return Err(NetworkShapeError::TableCount {
            expected: patterns.len(),
            found: count as usize,
        }
        .into());
    }

    let mut tables = Vec::with_capacity(patterns.len());
    for index in 0..patterns.len() {
        let len = reader.read_u64::<LE>()?;
        if usize::try_from(len).ok() != Some(FEATURE_SPACE) {
            #[expect(clippy::cast_possible_truncation)]
            let found = len as usize;
            return Err(NetworkShapeError::TableSize {
                index,
                expected: FEATURE_SPACE,
                found,
            }
            .into());
        }
        let mut weights = vec![0.0; FEATURE_SPACE];
        reader.read_f32_into::<LE>(&mut weights)?;
        tables.push(WeightTable::from_vec(weights));
    }

    Ok(NTupleNetwork::from_tables(patterns, tables)?)
}

/// Writes every table of `network`.
pub fn write_network<W>(writer: &mut W, network: &NTupleNetwork) -> io::Result<()>
where
    W: Write,
{
    let count = u32::try_from(network.tables().len())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    writer.write_u32::<LE>(count)?;
    for table in network.tables() {
        writer.write_u64::<LE>(table.len() as u64)?;
        for &weight in table.as_slice() {
            writer.write_f32::<LE>(weight)?;
        }
    }
    Ok(())
}

/// Loads a network from the weight file at `path`.
pub fn load<P>(path: P, patterns: Vec<TuplePattern>) -> Result<NTupleNetwork, WeightFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let network = read_network(&mut reader, patterns)?;
    log::info!(
        "loaded {} weight tables from {}",
        network.tables().len(),
        path.display()
    );
    Ok(network)
}

/// Saves `network` to the weight file at `path`.
pub fn save<P>(path: P, network: &NTupleNetwork) -> Result<(), WeightFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_network(&mut writer, network)?;
    writer.flush()?;
    log::info!(
        "saved {} weight tables to {}",
        network.tables().len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tdl2048_engine::Board;
    use tdl2048_evaluator::n_tuple::ROW_COLUMN_PATTERNS;

    use super::*;

    fn trained_network() -> NTupleNetwork {
        let mut network = NTupleNetwork::row_column();
        let board = Board::from_exponents([1, 2, 3, 4, 0, 0, 5, 0, 0, 0, 0, 0, 6, 0, 0, 1]);
        network.adjust(&board, 12.5, 0.1);
        network
    }

    #[test]
    fn test_layout() {
        let mut bytes = Vec::new();
        write_network(&mut bytes, &trained_network()).unwrap();
        assert_eq!(bytes.len(), 4 + 8 * (8 + 4 * FEATURE_SPACE));
        assert_eq!(&bytes[..4], &8_u32.to_le_bytes());
        assert_eq!(&bytes[4..12], &(FEATURE_SPACE as u64).to_le_bytes());
    }

    #[test]
    fn test_reload_restores_weights() {
        let network = trained_network();
        let mut bytes = Vec::new();
        write_network(&mut bytes, &network).unwrap();
        let loaded = read_network(&mut Cursor::new(bytes), ROW_COLUMN_PATTERNS.to_vec()).unwrap();
        assert_eq!(loaded, network);
    }

    #[test]
    fn test_table_count_mismatch() {
        let mut bytes = Vec::new();
        write_network(&mut bytes, &trained_network()).unwrap();
        let err = read_network(&mut Cursor::new(bytes), ROW_COLUMN_PATTERNS[..4].to_vec())
            .unwrap_err();
        assert!(matches!(
            err,
            WeightFileError::Shape(NetworkShapeError::TableCount {
                expected: 4,
                found: 8
            })
        ));
    }

    #[test]
    fn test_table_size_mismatch() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&8_u32.to_le_bytes());
        bytes.extend_from_slice(&3_u64.to_le_bytes());
        bytes.extend_from_slice(&[0; 12]);
        let err = read_network(&mut Cursor::new(bytes), ROW_COLUMN_PATTERNS.to_vec()).unwrap_err();
        assert!(matches!(
            err,
            WeightFileError::Shape(NetworkShapeError::TableSize {
                index: 0,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_truncated_file() {
        let mut bytes = Vec::new();
        write_network(&mut bytes, &trained_network()).unwrap();
        bytes.truncate(bytes.len() - 1);
        let err = read_network(&mut Cursor::new(bytes), ROW_COLUMN_PATTERNS.to_vec()).unwrap_err();
        assert!(matches!(err, WeightFileError::Io(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load("/nonexistent/tdl2048/weights.bin", ROW_COLUMN_PATTERNS.to_vec())
            .unwrap_err();
        assert!(matches!(err, WeightFileError::Io(_)));
    }
}
