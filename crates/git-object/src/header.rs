use crate::{ObjectError, ObjectType};

/// Parse an object header from raw bytes.
///
/// The header format is `"<type> <size>\0"`. Returns `(type, content_size, header_length)`
/// where `header_length` includes the null terminator.
pub fn parse_header(data: &[u8]) -> Result<(ObjectType, usize, usize), ObjectError> {
    let null_pos = data
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| ObjectError::InvalidHeader("missing null terminator".into()))?;

    let header = &data[..null_pos];
    let space_pos = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| ObjectError::InvalidHeader("missing space in header".into()))?;

    let obj_type = ObjectType::from_bytes(&header[..space_pos])?;

    let size_str = std::str::from_utf8(&header[space_pos + 1..])
        .map_err(|_| ObjectError::InvalidHeader("non-ASCII size".into()))?;
    let content_size: usize = size_str
        .parse()
        .map_err(|_| ObjectError::InvalidHeader(format!("invalid size: {size_str}")))?;

    Ok((obj_type, content_size, null_pos + 1))
}

/// Split a decompressed object into its type and payload.
///
/// The payload is everything after the first null byte. Its length must
/// match the size the header declares; a shorter or longer payload is an
/// error rather than being cut or padded.
pub fn split_object(data: &[u8]) -> Result<(ObjectType, &[u8]), ObjectError> {
    let (obj_type, content_size, header_len) = parse_header(data)?;
    let content = &data[header_len..];
    if content.len() != content_size {
        return Err(ObjectError::SizeMismatch {
            declared: content_size,
            actual: content.len(),
        });
    }
    Ok((obj_type, content))
}

/// Like [`split_object`], but fails unless the object has the expected type.
pub fn expect_object(data: &[u8], expected: ObjectType) -> Result<&[u8], ObjectError> {
    let (actual, content) = split_object(data)?;
    if actual != expected {
        return Err(ObjectError::UnexpectedType { expected, actual });
    }
    Ok(content)
}

/// Write an object header: `"<type> <size>\0"`.
pub fn write_header(obj_type: ObjectType, content_size: usize) -> Vec<u8> {
    format!("{} {}\0", obj_type, content_size).into_bytes()
}
