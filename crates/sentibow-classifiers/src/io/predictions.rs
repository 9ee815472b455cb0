use std::io::Write;

use anyhow::{Context, Result};

use crate::pipeline::Prediction;

/// Write predictions as TSV: `text`, `predicted_label`, then one `p_<class>`
/// column per class.
pub fn write_predictions<W: Write>(writer: W, predictions: &[Prediction]) -> Result<()> {
    let num_classes = predictions
        .iter()
        .map(|p| p.probabilities.len())
        .max()
        .unwrap_or(0);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    let mut header = vec!["text".to_string(), "predicted_label".to_string()];
    header.extend((0..num_classes).map(|c| format!("p_{}", c)));
    writer.write_record(&header)?;

    for prediction in predictions {
        let mut row = vec![prediction.text.clone(), prediction.label.to_string()];
        row.extend(prediction.probabilities.iter().map(|p| format!("{:.6}", p)));
        writer.write_record(&row)?;
    }

    writer.flush().context("Failed to flush prediction output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Array1;

    #[test]
    fn writes_header_and_rows() {
        let predictions = vec![Prediction {
            text: "good movie".to_string(),
            label: 1,
            probabilities: Array1::from_vec(vec![0.25, 0.75]),
        }];
        let mut buf = Vec::new();
        write_predictions(&mut buf, &predictions).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "text\tpredicted_label\tp_0\tp_1");
        assert_eq!(lines[1], "good movie\t1\t0.250000\t0.750000");
    }
}
