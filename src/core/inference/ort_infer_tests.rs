use super::*;
use crate::core::config::{ModelInferenceConfig, OrtSessionConfig};

#[test]
fn test_from_config_missing_model_is_load_error() {
    let common = ModelInferenceConfig::new()
        .session_pool_size(2)
        .ort_session(OrtSessionConfig::new().with_intra_threads(1));

    let err = OrtInfer::from_config(&common, "dummy_path.onnx").unwrap_err();
    assert!(matches!(err, GlyphError::ModelLoad { .. }));
    assert!(err.to_string().contains("dummy_path.onnx"));
}

#[test]
fn test_new_rejects_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.onnx");
    std::fs::write(&path, b"not an onnx graph").unwrap();

    assert!(OrtInfer::new(&path).is_err());
}

#[test]
fn test_expect_2d_accepts_flat_and_batched_outputs() {
    let flat = expect_2d("m", &[3], &[0.1, 0.7, 0.2]).unwrap();
    assert_eq!(flat.shape(), &[1, 3]);

    let batched = expect_2d("m", &[1, 3], &[0.1, 0.7, 0.2]).unwrap();
    assert_eq!(batched.row(0).to_vec(), vec![0.1, 0.7, 0.2]);
}

#[test]
fn test_expect_2d_rejects_bad_outputs() {
    assert!(expect_2d("m", &[1, 1, 3], &[0.1, 0.7, 0.2]).is_err());
    assert!(expect_2d("m", &[1, 4], &[0.1, 0.7, 0.2]).is_err());
}

#[test]
fn test_probe_tensor_shape() {
    assert_eq!(probe_tensor().shape(), &[1, 28, 28, 1]);
}

#[test]
fn test_declared_output_width() {
    let path = Path::new("model/emnist.onnx");
    assert_eq!(declared_output_width(path, &[1, 27]).unwrap(), Some(27));
    assert_eq!(declared_output_width(path, &[10]).unwrap(), Some(10));
    assert_eq!(declared_output_width(path, &[-1, -1]).unwrap(), None);
    assert_eq!(declared_output_width(path, &[]).unwrap(), None);
}

#[test]
fn test_declared_output_width_rejects_rank_three() {
    let err = declared_output_width(Path::new("model/emnist.onnx"), &[1, 1, 27]).unwrap_err();
    assert!(matches!(err, GlyphError::ModelLoad { .. }));
    assert!(err.to_string().contains("[1, 1, 27]"));
}
