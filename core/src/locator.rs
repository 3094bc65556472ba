use crate::error::{ClientError, Result};
use crate::views::ROW_WIDTH;

/// Where an address lands in the memory grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryCursor {
    pub address: u32,
    pub row: usize,
    pub column: usize,
}

impl MemoryCursor {
    pub fn at(address: u32) -> Self {
        let address_index = address as usize;
        Self {
            address,
            row: address_index / ROW_WIDTH,
            column: address_index % ROW_WIDTH,
        }
    }
}

/// Resolves a typed hex address. Empty input selects nothing.
pub fn locate(input: &str) -> Result<Option<MemoryCursor>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let address = u32::from_str_radix(digits, 16).map_err(|_| ClientError::AddressParse {
        input: input.to_string(),
    })?;
    Ok(Some(MemoryCursor::at(address)))
}

/// Like [`locate`], but also rejects addresses the rendered memory doesn't reach.
pub fn locate_within(input: &str, memory_len: usize) -> Result<Option<MemoryCursor>> {
    match locate(input)? {
        Some(cursor) if cursor.address as usize >= memory_len => Err(ClientError::AddressOutOfRange {
            address: cursor.address,
            limit: memory_len,
        }),
        found => Ok(found),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10", 1, 0)]
    #[case("0x10", 1, 0)]
    #[case("0X1f", 1, 15)]
    #[case("  ABC ", 0xab, 0xc)]
    #[case("0", 0, 0)]
    #[case("7fff", 0x7ff, 0xf)]
    fn resolves_row_and_column(#[case] input: &str, #[case] row: usize, #[case] column: usize) {
        let cursor = locate(input).unwrap().unwrap();
        assert_eq!((cursor.row, cursor.column), (row, column));
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert_eq!(locate("").unwrap(), None);
        assert_eq!(locate("   ").unwrap(), None);
    }

    #[rstest]
    #[case("zz")]
    #[case("0x")]
    #[case("10zz")]
    #[case("-4")]
    #[case("100000000")]
    fn rejects_non_hex(#[case] input: &str) {
        let err = locate(input).unwrap_err();
        assert!(matches!(err, ClientError::AddressParse { input: ref i } if i == input));
    }

    #[test]
    fn bounds_check_uses_memory_length() {
        assert_eq!(locate_within("1f", 32).unwrap().unwrap().row, 1);
        let err = locate_within("20", 32).unwrap_err();
        assert!(matches!(err, ClientError::AddressOutOfRange { address: 0x20, limit: 32 }));
        assert_eq!(locate_within("", 0).unwrap(), None);
    }
}
