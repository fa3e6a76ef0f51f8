use alpha_peak::analysis::{LocalMaximaFinder, ThresholdPeakFinder};
use alpha_peak::model::{Band, FrequencyAxis, MeanFrequency, NoPeakReason, PeakOutcome, PsdMatrix};
use alpha_peak::psd::load_psd_csv;
use alpha_peak::report::{product_json, write_peak_table, write_product_json};
use alpha_peak::{detect_alpha_peak, DetectionConfig, DetectionPipeline, PeakError};
use std::fs;
use tempfile::TempDir;

/// Two-channel PSD: one clear 9 Hz bump and one flat channel
fn reference_data() -> (FrequencyAxis, PsdMatrix) {
    let axis = FrequencyAxis::new((5..=15).map(f64::from).collect()).unwrap();
    let psd = PsdMatrix::new(
        vec!["O1".to_string(), "O2".to_string()],
        vec![
            vec![0.0, 0.0, 1.0, 2.0, 5.0, 3.0, 2.0, 1.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
        ],
    )
    .unwrap();
    (axis, psd)
}

const REFERENCE_CSV: &str = "channels,5,6,7,8,9,10,11,12,13,14,15\n\
O1,0,0,1,2,5,3,2,1,1,0,0\n\
O2,0,0,1,1,1,1,1,1,1,1,0\n";

#[test]
fn test_reference_example() {
    let (axis, psd) = reference_data();
    let config = DetectionConfig::new(Band::new(6.9, 14.1).unwrap());
    let report = DetectionPipeline::new(config, LocalMaximaFinder::new())
        .run(&axis, &psd)
        .unwrap();

    assert_eq!(report.channels.len(), 2);
    assert_eq!(report.channels[0].label, "O1");
    assert_eq!(report.channels[0].frequency(), Some(9.0));
    assert_eq!(report.channels[1].label, "O2");
    assert_eq!(
        report.channels[1].outcome,
        PeakOutcome::NoPeak {
            reason: NoPeakReason::NoMaxima
        }
    );
    assert_eq!(report.summary.mean, MeanFrequency::Computed(9.0));
    assert_eq!(report.summary.missing, 1);
}

#[test]
fn test_detect_alpha_peak_defaults() {
    let (axis, psd) = reference_data();
    let report = detect_alpha_peak(&axis, &psd).unwrap();
    assert_eq!(report.summary.mean.value(), Some(9.0));
    assert_eq!(report.band, Band::alpha());
}

#[test]
fn test_results_are_reproducible() {
    let axis = FrequencyAxis::new((0..64).map(|i| i as f64 * 0.5).collect()).unwrap();
    let rows: Vec<Vec<f64>> = (0..32)
        .map(|c| {
            let centre = 8.0 + (c % 9) as f64 * 0.5;
            axis.values()
                .iter()
                .map(|f| 1.0 / (1.0 + f) + 3.0 * (-(f - centre).powi(2) / 2.0).exp())
                .collect()
        })
        .collect();
    let psd = PsdMatrix::from_rows(rows).unwrap();

    let parallel = DetectionPipeline::new(DetectionConfig::default(), LocalMaximaFinder::new())
        .run(&axis, &psd)
        .unwrap();
    let sequential = DetectionPipeline::new(
        DetectionConfig::default().with_parallel(false),
        LocalMaximaFinder::new(),
    )
    .run(&axis, &psd)
    .unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(
        parallel.summary.mean.value().map(f64::to_bits),
        sequential.summary.mean.value().map(f64::to_bits)
    );
    assert_eq!(parallel.summary.missing, 0);
}

#[test]
fn test_configuration_errors_abort_run() {
    let (axis, psd) = reference_data();

    let outside = DetectionConfig::new(Band::new(40.0, 60.0).unwrap());
    let err = DetectionPipeline::new(outside, LocalMaximaFinder::new())
        .run(&axis, &psd)
        .unwrap_err();
    assert!(err.is_configuration());

    assert!(matches!(
        Band::new(14.0, 7.0),
        Err(PeakError::InvalidBand { .. })
    ));
}

#[test]
fn test_csv_to_outputs() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let psd_path = temp_dir.path().join("psd.csv");
    fs::write(&psd_path, REFERENCE_CSV).expect("Failed to write PSD table");

    let (axis, psd) = load_psd_csv(&psd_path).unwrap();
    assert_eq!(psd.labels(), &["O1".to_string(), "O2".to_string()]);

    let report = DetectionPipeline::new(DetectionConfig::default(), ThresholdPeakFinder::new())
        .run(&axis, &psd)
        .unwrap();

    let table_path = temp_dir.path().join("alpha_peak.csv");
    write_peak_table(&table_path, &report).unwrap();
    let table = fs::read_to_string(&table_path).unwrap();
    assert_eq!(table, "channels,alpha_peak\nO1,9\nO2,n/a\n");

    let product_path = temp_dir.path().join("product.json");
    write_product_json(&product_path, &product_json(&report)).unwrap();
    let product: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&product_path).unwrap()).unwrap();
    assert_eq!(product["brainlife"][0]["type"], "success");
    assert_eq!(
        product["brainlife"][0]["msg"],
        "Alpha peak successfully detected at 9.00Hz."
    );
    assert_eq!(product["summary"]["missing"], 1);
}

#[test]
fn test_missing_file_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = load_psd_csv(&temp_dir.path().join("absent.csv")).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.csv"));
}
