use std::fmt;

/// An error that can occur when decoding or encoding game data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    pub(crate) fn eof(offset: usize, requested: usize) -> Error {
        Error::new(ErrorKind::Eof { offset, requested })
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error and return the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the byte offset that the error occurs (if available)
    pub fn offset(&self) -> Option<usize> {
        self.0.offset()
    }

    /// Returns true if the error was caused by reading past the end of the
    /// input.
    pub fn is_eof(&self) -> bool {
        matches!(*self.0, ErrorKind::Eof { .. })
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// A read or skip requested more bytes than remain in the buffer
    Eof { offset: usize, requested: usize },

    /// An animation opcode was not recognized and the decoder was configured
    /// to reject unknown opcodes
    UnknownOpcode { opcode: u8, offset: usize },

    /// The 64x64 window requested for encoding does not fit in the block
    RegionOutOfBounds {
        offset_x: usize,
        offset_y: usize,
        width: usize,
        length: usize,
    },
}

impl ErrorKind {
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ErrorKind::Eof { offset, .. } => Some(offset),
            ErrorKind::UnknownOpcode { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Eof { offset, requested } => write!(
                f,
                "not enough data to read {} byte(s) at offset {}",
                requested, offset
            ),
            ErrorKind::UnknownOpcode { opcode, offset } => write!(
                f,
                "unrecognized sequence opcode encountered (opcode: {}, offset: {})",
                opcode, offset
            ),
            ErrorKind::RegionOutOfBounds {
                offset_x,
                offset_y,
                width,
                length,
            } => write!(
                f,
                "region window at ({}, {}) does not fit in a {}x{} block",
                offset_x, offset_y, width, length
            ),
        }
    }
}
