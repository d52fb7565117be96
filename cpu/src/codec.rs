//! The on-disk table formats: a human-inspectable text format and a compact
//! binary format, both self-describing via a 4-byte magic. See the binary
//! layout table in the crate's design notes for the exact byte offsets.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use raintable_commons::{
    Charset, DigestBytes, HashKind, Password, RainbowTableCtx, ReductionKind, MAX_PASSWORD_LENGTH,
};

use crate::{
    error::{RainbowError, RainbowResult},
    table::{RowMap, Table},
};

const TEXT_MAGIC: &[u8; 4] = b"RTXT";
const BINARY_MAGIC: &[u8; 4] = b"RBIN";
const BINARY_HEADER_LEN: usize = 24;

/// Loads a table from either format, dispatching on the leading magic bytes.
pub fn load(path: &Path) -> RainbowResult<Table> {
    tracing::debug!(path = %path.display(), "loading table");

    let bytes = std::fs::read(path)?;

    if bytes.len() < 4 {
        return Err(RainbowError::BadMagic);
    }

    match &bytes[0..4] {
        m if m == TEXT_MAGIC => load_text(&bytes),
        m if m == BINARY_MAGIC => load_binary(&bytes),
        _ => Err(RainbowError::BadMagic),
    }
}

/// Saves a table in the text format (magic `RTXT`). Refuses to save an empty table.
pub fn save_text(path: &Path, table: &Table) -> RainbowResult<()> {
    if table.is_empty() {
        return Err(RainbowError::EmptyTable);
    }

    tracing::info!(path = %path.display(), rows = table.len(), "saving text table");

    let ctx = table.ctx();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "RTXT")?;
    writeln!(writer, "{}", ctx.hash.name())?;
    writeln!(writer, "{}", table.len())?;
    writeln!(writer, "{}", ctx.chain_length)?;
    writeln!(writer, "{}", ctx.password_length)?;

    for (endpoint, seed) in table.sorted_rows() {
        writeln!(writer, "{}", hex::encode(endpoint.as_slice()))?;
        writeln!(writer, "{seed}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Saves a table in the binary format (magic `RBIN`). Refuses to save an empty table.
pub fn save_binary(path: &Path, table: &Table) -> RainbowResult<()> {
    if table.is_empty() {
        return Err(RainbowError::EmptyTable);
    }

    tracing::info!(path = %path.display(), rows = table.len(), "saving binary table");

    let ctx = table.ctx();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(BINARY_MAGIC)?;
    writer.write_all(&ctx.hash.id().to_le_bytes())?;
    writer.write_all(&(table.len() as u64).to_le_bytes())?;
    writer.write_all(&ctx.chain_length.to_le_bytes())?;
    writer.write_all(&(ctx.password_length as u32).to_le_bytes())?;

    for (endpoint, seed) in table.sorted_rows() {
        writer.write_all(endpoint.as_slice())?;
        writer.write_all(seed.as_ref())?;
    }

    writer.flush()?;
    Ok(())
}

fn default_ctx(hash: HashKind, chain_length: u32, password_length: usize, vertical: u64) -> RainbowTableCtx {
    // The on-disk formats carry only H, N, C and L (see §4.6): the charset
    // and reduction variant are process-wide constants, not table parameters.
    RainbowTableCtx {
        hash,
        reduction: ReductionKind::Salted,
        charset: Charset::default(),
        vertical,
        chain_length,
        password_length,
    }
}

fn load_text(bytes: &[u8]) -> RainbowResult<Table> {
    let text = String::from_utf8(bytes.to_vec())
        .map_err(|_| RainbowError::MalformedText("file is not valid UTF-8".into()))?;
    let mut lines = text.lines();

    lines.next(); // magic, already matched by the caller

    let hash_name = lines
        .next()
        .ok_or_else(|| RainbowError::MalformedText("missing hash function name".into()))?;
    let hash = HashKind::from_name(hash_name)?;

    let n: u64 = lines
        .next()
        .ok_or_else(|| RainbowError::MalformedText("missing row count".into()))?
        .parse()
        .map_err(|_| RainbowError::MalformedText("row count is not a number".into()))?;

    let chain_length: u32 = lines
        .next()
        .ok_or_else(|| RainbowError::MalformedText("missing chain length".into()))?
        .parse()
        .map_err(|_| RainbowError::MalformedText("chain length is not a number".into()))?;

    let password_length: usize = lines
        .next()
        .ok_or_else(|| RainbowError::MalformedText("missing password length".into()))?
        .parse()
        .map_err(|_| RainbowError::MalformedText("password length is not a number".into()))?;

    if password_length > MAX_PASSWORD_LENGTH {
        return Err(RainbowError::PasswordTooLong(password_length, MAX_PASSWORD_LENGTH));
    }

    let mut rows = RowMap::with_capacity(n as usize);

    for _ in 0..n {
        let hex_line = lines
            .next()
            .ok_or(RainbowError::SizeMismatch { expected: n, actual: rows.len() as u64 })?;
        let seed_line = lines
            .next()
            .ok_or(RainbowError::SizeMismatch { expected: n, actual: rows.len() as u64 })?;

        let endpoint_bytes =
            hex::decode(hex_line).map_err(|_| RainbowError::MalformedText("invalid hex endpoint".into()))?;
        if endpoint_bytes.len() != hash.output_width() {
            return Err(RainbowError::LengthMismatch {
                expected: hash.output_width(),
                actual: endpoint_bytes.len(),
            });
        }

        if seed_line.len() != password_length {
            return Err(RainbowError::LengthMismatch {
                expected: password_length,
                actual: seed_line.len(),
            });
        }

        let endpoint: DigestBytes = endpoint_bytes
            .as_slice()
            .try_into()
            .expect("length already checked above");
        rows.insert(endpoint, Password::new(seed_line.as_bytes()));
    }

    if lines.next().is_some() {
        return Err(RainbowError::SizeMismatch {
            expected: n,
            actual: n + 1,
        });
    }

    let ctx = default_ctx(hash, chain_length, password_length, n);
    Ok(Table::from_parts(rows, Default::default(), ctx))
}

fn load_binary(bytes: &[u8]) -> RainbowResult<Table> {
    if bytes.len() < BINARY_HEADER_LEN {
        return Err(RainbowError::SizeMismatch {
            expected: BINARY_HEADER_LEN as u64,
            actual: bytes.len() as u64,
        });
    }

    let hash_id = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    let n = u64::from_le_bytes(bytes[8..16].try_into().unwrap());
    let chain_length = u32::from_le_bytes(bytes[16..20].try_into().unwrap());
    let password_length = u32::from_le_bytes(bytes[20..24].try_into().unwrap()) as usize;

    let hash = HashKind::from_id(hash_id)?;
    if password_length > MAX_PASSWORD_LENGTH {
        return Err(RainbowError::PasswordTooLong(password_length, MAX_PASSWORD_LENGTH));
    }
    let row_size = hash.output_width() + password_length;
    let data = &bytes[BINARY_HEADER_LEN..];

    let expected_size = n * row_size as u64;
    if data.len() as u64 != expected_size {
        return Err(RainbowError::SizeMismatch {
            expected: n,
            actual: data.len() as u64 / row_size.max(1) as u64,
        });
    }

    let mut rows = RowMap::with_capacity(n as usize);
    for i in 0..n as usize {
        let offset = i * row_size;
        let endpoint: DigestBytes = data[offset..offset + hash.output_width()]
            .try_into()
            .expect("row size already validated");
        let seed = Password::new(&data[offset + hash.output_width()..offset + row_size]);
        rows.insert(endpoint, seed);
    }

    let ctx = default_ctx(hash, chain_length, password_length, n);
    Ok(Table::from_parts(rows, Default::default(), ctx))
}

#[cfg(test)]
mod tests {
    use raintable_commons::HashKind;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{builder, ctx_builder::RainbowTableCtxBuilder};

    fn sample_table() -> Table {
        let ctx = RainbowTableCtxBuilder::new()
            .hash(HashKind::Sha1)
            .chain_length(3)
            .password_length(4)
            .vertical(8)
            .build()
            .unwrap();
        builder::build(ctx, 1, None).unwrap()
    }

    #[test]
    fn text_round_trip_preserves_rows_and_ctx() {
        let table = sample_table();
        let file = NamedTempFile::new().unwrap();
        save_text(file.path(), &table).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded.len(), table.len());
        assert_eq!(loaded.ctx().hash, table.ctx().hash);
        assert_eq!(loaded.ctx().chain_length, table.ctx().chain_length);
        assert_eq!(loaded.ctx().password_length, table.ctx().password_length);

        for (endpoint, seed) in table.rows() {
            assert_eq!(loaded.rows().get(endpoint).unwrap().as_ref(), seed.as_ref());
        }
    }

    #[test]
    fn binary_round_trip_preserves_rows_and_ctx() {
        let table = sample_table();
        let file = NamedTempFile::new().unwrap();
        save_binary(file.path(), &table).unwrap();

        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded.len(), table.len());
        assert_eq!(loaded.ctx().hash, table.ctx().hash);

        for (endpoint, seed) in table.rows() {
            assert_eq!(loaded.rows().get(endpoint).unwrap().as_ref(), seed.as_ref());
        }
    }

    #[test]
    fn text_and_binary_saves_agree() {
        let table = sample_table();
        let text_file = NamedTempFile::new().unwrap();
        let binary_file = NamedTempFile::new().unwrap();
        save_text(text_file.path(), &table).unwrap();
        save_binary(binary_file.path(), &table).unwrap();

        let from_text = load(text_file.path()).unwrap();
        let from_binary = load(binary_file.path()).unwrap();
        assert_eq!(from_text.len(), from_binary.len());
        for (endpoint, seed) in from_text.rows() {
            assert_eq!(
                from_binary.rows().get(endpoint).unwrap().as_ref(),
                seed.as_ref()
            );
        }
    }

    #[test]
    fn truncated_binary_file_fails_with_size_mismatch() {
        let table = sample_table();
        let file = NamedTempFile::new().unwrap();
        save_binary(file.path(), &table).unwrap();

        let mut bytes = std::fs::read(file.path()).unwrap();
        bytes.truncate(bytes.len() - 4);
        std::fs::write(file.path(), &bytes).unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, RainbowError::SizeMismatch { .. }));
    }

    #[test]
    fn unknown_magic_fails_with_bad_magic() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"ZZZZ garbage").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, RainbowError::BadMagic));
    }

    #[test]
    fn saving_an_empty_table_is_refused() {
        let ctx = RainbowTableCtxBuilder::new().vertical(0).build().unwrap();
        let table = Table::empty(ctx);
        let file = NamedTempFile::new().unwrap();

        assert!(matches!(
            save_text(file.path(), &table).unwrap_err(),
            RainbowError::EmptyTable
        ));
        assert!(matches!(
            save_binary(file.path(), &table).unwrap_err(),
            RainbowError::EmptyTable
        ));
    }
}
