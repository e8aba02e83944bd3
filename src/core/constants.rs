//! Constants shared across the recognition pipeline.

/// Side length of the square model input, in pixels.
pub const INPUT_SIZE: u32 = 28;

/// Shape of a single normalized input tensor: batch, height, width, channel.
pub const INPUT_SHAPE: [usize; 4] = [1, INPUT_SIZE as usize, INPUT_SIZE as usize, 1];

/// Number of ranked predictions returned alongside the top-1 class.
pub const TOP_K: usize = 3;

/// Number of classes of the digit model.
pub const DIGIT_CLASSES: usize = 10;

/// Letters in label order.
pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Label returned for indices that map to no letter.
pub const UNKNOWN_LABEL: char = '?';

/// Default directory holding the model artifacts.
pub const DEFAULT_MODEL_DIR: &str = "model";

/// Default file name of the digit classifier.
pub const DEFAULT_DIGIT_MODEL: &str = "mnist_optimized.onnx";

/// Default file name of the letter classifier.
pub const DEFAULT_LETTER_MODEL: &str = "emnist_optimized.onnx";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Largest accepted width or height of a decoded image, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 4096;

/// Largest allocation the image decoder may make for one image, in bytes.
pub const MAX_DECODE_ALLOC_BYTES: u64 = 64 * 1024 * 1024;

/// Default maximum accepted request body, in bytes.
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;
