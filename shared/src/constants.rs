// Host protocol limits

/// Bitmap pixel data is addressed in square tiles of this many pixels per side.
pub const TILE_SIZE: usize = 8;
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;

/// Longest piece of text a single text-set command may carry, in bytes.
pub const TEXT_CHUNK_SIZE: usize = 1279;

/// Upper bound on the number of bytes in a blob tag.
pub const TAG_BLOB_MAX: usize = 65_536;

/// Upper bound on the number of points in a ramp fragment.
pub const RAMP_POINTS_MAX: usize = 48;

/// Curves carry between one and this many dimensions per key.
pub const CURVE_DIMENSIONS_MAX: u8 = 4;

/// A method may declare at most this many parameters.
pub const METHOD_PARAMS_MAX: usize = 255;

// Document limits

/// Highest `n`/`f`/`b` ordinal a document may use. Remap tables are sized by
/// the highest ordinal they hold, so larger ones are rejected.
pub const ORDINAL_MAX: u32 = (1 << 20) - 1;
