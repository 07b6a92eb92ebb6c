//! End-to-end tests: quantize classifier parameters, write memory files,
//! read them back, and run the full analysis flow.

use std::collections::HashMap;

use qmem_fixed_point::{QFormat, Q8_8};
use qmem_harness::{
    build_report, channel_distribution, compare_outputs, AnalysisSummary, Assessment, ReportInputs,
};
use qmem_harness::testdata::{generate_simple_weights, TestDataConfig};
use qmem_memfile::{read_hex_values, rebase_bits_to_hex, write_hex_values};
use qmem_model::{
    export_all, ClassifierConfig, LayerConfig, LayerRegistry, QWidths, SafetensorsLoader,
};
use safetensors::tensor::TensorView;
use safetensors::Dtype;

fn classifier_fixture() -> (ClassifierConfig, SafetensorsLoader) {
    let kernel: Vec<f32> = vec![
        0.5, -0.25, 1.0, //
        0.0, 2.0, -1.5, //
        0.75, -0.5, 0.125, //
        // second output channel
        -0.125, 0.25, -0.375, //
        0.5, -0.625, 0.75, //
        -0.875, 1.0, -1.125,
    ];
    let gamma: Vec<f32> = vec![1.0, 0.5];
    let beta: Vec<f32> = vec![-0.25, 0.125];

    let kernel_bytes: Vec<u8> = kernel.iter().flat_map(|v| v.to_le_bytes()).collect();
    let gamma_bytes: Vec<u8> = gamma.iter().flat_map(|v| v.to_le_bytes()).collect();
    let beta_bytes: Vec<u8> = beta.iter().flat_map(|v| v.to_le_bytes()).collect();

    let mut tensors = HashMap::new();
    tensors.insert(
        "features.0.conv.weight".to_string(),
        TensorView::new(Dtype::F32, vec![2, 3, 3], &kernel_bytes).unwrap(),
    );
    tensors.insert(
        "features.0.bn.weight".to_string(),
        TensorView::new(Dtype::F32, vec![2], &gamma_bytes).unwrap(),
    );
    tensors.insert(
        "features.0.bn.bias".to_string(),
        TensorView::new(Dtype::F32, vec![2], &beta_bytes).unwrap(),
    );
    let bytes = safetensors::serialize(&tensors, &None).unwrap();

    let config = ClassifierConfig {
        channels: 2,
        weight_widths: QWidths {
            int_bits: 4,
            frac_bits: 4,
        },
        batchnorm_widths: QWidths {
            int_bits: 4,
            frac_bits: 4,
        },
        layers: vec![
            LayerConfig::Conv {
                name: "first_layer.conv".to_string(),
                tensor: "features.0.conv.weight".to_string(),
                out_channels: 2,
                kernel_height: 3,
                kernel_width: 3,
            },
            LayerConfig::BatchNorm {
                name: "first_layer.bn".to_string(),
                gamma_tensor: "features.0.bn.weight".to_string(),
                beta_tensor: "features.0.bn.bias".to_string(),
                channels: 2,
            },
        ],
        ..ClassifierConfig::default()
    };

    (config, SafetensorsLoader::from_bytes(bytes).unwrap())
}

#[test]
fn export_then_decode_recovers_quantized_weights() {
    let (config, loader) = classifier_fixture();
    config.validate().unwrap();
    let registry = LayerRegistry::from_config(&config, &loader).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let manifest = export_all(&registry, &config, dir.path()).unwrap();
    assert_eq!(manifest.len(), 2);

    // Read the kernel file back and decode each channel line
    let format = QFormat::new(4, 4).unwrap();
    let written = std::fs::read_to_string(&manifest[0].path).unwrap();
    let lines: Vec<&str> = written.split('\n').collect();
    assert_eq!(lines.len(), 2);

    for (channel, line) in lines.iter().enumerate() {
        let decoded = format.decode_packed(line, 9).unwrap();
        // Line packing is reverse raster: decoded[0] is the last kernel
        // value of the channel, truncated toward zero to 1/16 steps
        let original: Vec<f32> = (0..9)
            .map(|i| {
                let idx = channel * 9 + (8 - i);
                [
                    0.5f32, -0.25, 1.0, 0.0, 2.0, -1.5, 0.75, -0.5, 0.125, -0.125, 0.25, -0.375,
                    0.5, -0.625, 0.75, -0.875, 1.0, -1.125,
                ][idx]
            })
            .collect();
        for (got, want) in decoded.iter().zip(&original) {
            let quantized = (*want as f64 / format.resolution()).trunc() * format.resolution();
            assert_eq!(*got, quantized);
        }
    }
}

#[test]
fn batchnorm_file_has_gamma_then_beta_reversed() {
    let (config, loader) = classifier_fixture();
    let registry = LayerRegistry::from_config(&config, &loader).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let manifest = export_all(&registry, &config, dir.path()).unwrap();

    let format = QFormat::new(4, 4).unwrap();
    let written = std::fs::read_to_string(&manifest[1].path).unwrap();
    let lines: Vec<&str> = written.split('\n').collect();
    assert_eq!(lines.len(), 2);

    // gamma = [1.0, 0.5] reversed -> [0.5, 1.0]
    assert_eq!(format.decode_packed(lines[0], 2).unwrap(), vec![0.5, 1.0]);
    // beta = [-0.25, 0.125] reversed -> [0.125, -0.25]
    assert_eq!(
        format.decode_packed(lines[1], 2).unwrap(),
        vec![0.125, -0.25]
    );
}

#[test]
fn generated_hex_files_read_back() {
    let config = TestDataConfig {
        width: 6,
        height: 6,
        channels: 4,
        ..TestDataConfig::default()
    };
    let weights = generate_simple_weights(&config);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simple_weights.mem");
    write_hex_values(&path, &weights, config.format, "Simple Test Weights").unwrap();

    let values = read_hex_values(&path);
    assert_eq!(values.len(), weights.len());

    // Identity kernels: exactly one nonzero tap per channel, value 1.0
    let one = config.format.to_raw(1.0) as i64;
    let nonzero: Vec<i64> = values.iter().copied().filter(|&v| v != 0).collect();
    assert_eq!(nonzero.len(), config.channels);
    assert!(nonzero.iter().all(|&v| v == one));
}

#[test]
fn rebased_stream_matches_expected_values() {
    // Two Q8.8 values in one continuous bit-stream
    let a = Q8_8.encode(1.5);
    let b = Q8_8.encode(-0.5);
    assert!(!a.overflow && !b.overflow);
    let stream = format!("{}{}", a.bits, b.bits);

    let hex = rebase_bits_to_hex(&stream, Q8_8).unwrap();
    assert_eq!(hex, vec!["0180".to_string(), "FF80".to_string()]);
}

#[test]
fn analysis_flow_classifies_and_reports() {
    let dir = tempfile::tempdir().unwrap();

    // Simulated outputs: 32 values, one off by a single LSB
    let expected: Vec<u32> = (0..32).map(|i| 0x0100 + i).collect();
    let mut actual = expected.clone();
    actual[5] += 1;

    let actual_path = dir.path().join("output_results.txt");
    let expected_path = dir.path().join("hs1_op_fixed.mem");
    write_hex_values(&actual_path, &actual, Q8_8, "Actual").unwrap();
    write_hex_values(&expected_path, &expected, Q8_8, "Expected").unwrap();

    let actual_values = read_hex_values(&actual_path);
    let expected_values = read_hex_values(&expected_path);
    assert_eq!(actual_values.len(), 32);

    let diff = compare_outputs(&actual_values, &expected_values);
    assert_eq!(diff.compared, 32);
    assert_eq!(diff.max_abs, 1);

    let channels = channel_distribution(&actual_values, 16);
    assert_eq!(channels.len(), 16);
    assert_eq!(channels[0].count, 2);

    let summary = AnalysisSummary::from_text(
        "Total outputs processed: 32\n\
         Exact matches: 31 (96.88%)\n\
         Close matches \u{2264}1 LSB: 1 (3.12%)\n\
         Total errors: 0 (0.00%)\n\
         Mean absolute error: 0.0312 LSB\n\
         Maximum error: 1.0000 LSB\n",
    );
    assert_eq!(
        Assessment::classify(summary.exact_match_percent(), summary.mean_error),
        Assessment::Excellent
    );

    let html = build_report(&ReportInputs {
        summary: &summary,
        channels: &channels,
        plots_dir: dir.path(),
    });
    assert!(html.contains("EXCELLENT"));
    assert!(html.contains("Channel-wise Analysis"));
}
