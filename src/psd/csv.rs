//! CSV parsing for PSD tables

use crate::model::{FrequencyAxis, PsdMatrix};
use anyhow::{bail, Context, Result};

/// Parse a PSD table from CSV text
///
/// Blank lines are skipped. Cells may be wrapped in double quotes.
pub fn parse_psd_csv(text: &str) -> Result<(FrequencyAxis, PsdMatrix)> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().context("PSD table is empty")?;
    let header = split_row(header)?;
    if header.len() < 2 {
        bail!("PSD header needs a label column and at least one frequency column");
    }

    let frequencies = header[1..]
        .iter()
        .map(|cell| {
            cell.parse::<f64>()
                .with_context(|| format!("Invalid frequency in header: {:?}", cell))
        })
        .collect::<Result<Vec<f64>>>()?;
    let axis = FrequencyAxis::new(frequencies)?;

    let mut labels = Vec::new();
    let mut rows = Vec::new();

    for (line_no, line) in lines {
        let cells = split_row(line).with_context(|| format!("Line {}", line_no + 1))?;
        if cells.len() != header.len() {
            bail!(
                "Line {}: expected {} cells, found {}",
                line_no + 1,
                header.len(),
                cells.len()
            );
        }

        let row = cells[1..]
            .iter()
            .map(|cell| {
                cell.parse::<f64>()
                    .with_context(|| format!("Line {}: invalid power value {:?}", line_no + 1, cell))
            })
            .collect::<Result<Vec<f64>>>()?;

        labels.push(cells[0].clone());
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("PSD table has no channel rows");
    }

    let psd = PsdMatrix::new(labels, rows)?;
    psd.check_axis(&axis)?;

    Ok((axis, psd))
}

/// Split one CSV record into cells
///
/// Quoted cells may contain commas, and `""` inside quotes is a literal quote.
fn split_row(line: &str) -> Result<Vec<String>> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    quoted = false;
                }
            }
            '"' if cell.trim().is_empty() => {
                cell.clear();
                quoted = true;
            }
            ',' if !quoted => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }

    if quoted {
        bail!("Unterminated quoted cell: {:?}", line);
    }
    cells.push(cell.trim().to_string());

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_table() {
        let text = "channels,7.0,8.0,9.0\nO1,1.0,3.0,2.0\nO2,0.5,0.4,0.6\n";
        let (axis, psd) = parse_psd_csv(text).unwrap();

        assert_eq!(axis.values(), &[7.0, 8.0, 9.0]);
        assert_eq!(psd.labels(), &["O1".to_string(), "O2".to_string()]);
        assert_eq!(psd.row(0), &[1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_parse_quoted_and_blank_lines() {
        let text = "\"channels\",\"7.5\",\"8.0\"\n\n\"MEG 0113\",1e-12,2e-12\n";
        let (axis, psd) = parse_psd_csv(text).unwrap();
        assert_eq!(axis.values(), &[7.5, 8.0]);
        assert_eq!(psd.labels()[0], "MEG 0113");
        assert_eq!(psd.row(0), &[1e-12, 2e-12]);
    }

    #[test]
    fn test_parse_quoted_label_with_comma() {
        let text = "channels,7.0,8.0\n\"EEG 1,2\",1.0,2.0\n\"say \"\"hi\"\"\",3.0,4.0\n";
        let (_, psd) = parse_psd_csv(text).unwrap();
        assert_eq!(psd.labels(), &["EEG 1,2".to_string(), "say \"hi\"".to_string()]);
        assert_eq!(psd.row(0), &[1.0, 2.0]);
    }

    #[test]
    fn test_parse_rejects_unterminated_quote() {
        assert!(parse_psd_csv("channels,7.0\n\"O1,1.0\n").is_err());
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let text = "channels,7.0,8.0\nO1,1.0\n";
        let err = parse_psd_csv(text).unwrap_err();
        assert!(err.to_string().contains("expected 3 cells"));
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(parse_psd_csv("channels,seven\nO1,1.0\n").is_err());
        assert!(parse_psd_csv("channels,7.0\nO1,abc\n").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_psd_csv("").is_err());
        assert!(parse_psd_csv("channels,7.0,8.0\n").is_err());
    }

    #[test]
    fn test_parse_rejects_unordered_axis() {
        assert!(parse_psd_csv("channels,8.0,7.0\nO1,1.0,2.0\n").is_err());
    }
}
