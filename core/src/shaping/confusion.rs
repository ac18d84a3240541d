use crate::prelude::VisResult;
use crate::records::{ConfusionMatrix, Row};
use crate::shaping::fields::parse_count;

/// Parses one confusion matrix per row; the row position is the model index.
pub fn build_confusion_matrices(rows: &[Row]) -> VisResult<Vec<ConfusionMatrix>> {
    rows.iter()
        .enumerate()
        .map(|(model_index, row)| {
            Ok(ConfusionMatrix {
                model_index,
                true_positive: parse_count(row, "tp", model_index)?,
                true_negative: parse_count(row, "tn", model_index)?,
                false_positive: parse_count(row, "fp", model_index)?,
                false_negative: parse_count(row, "fn", model_index)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cm_row(tp: &str, tn: &str, fp: &str, fn_: &str) -> Row {
        [("tp", tp), ("tn", tn), ("fp", fp), ("fn", fn_)]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn model_index_follows_row_order() {
        let rows = vec![cm_row("80", "70", "10", "20"), cm_row("5", "6", "7", "8")];
        let matrices = build_confusion_matrices(&rows).unwrap();
        assert_eq!(matrices[0].model_index, 0);
        assert_eq!(matrices[1].model_index, 1);
        assert_eq!(matrices[0].true_positive, 80);
        assert_eq!(matrices[1].false_negative, 8);
        assert_eq!(matrices[0].total(), 180);
    }

    #[test]
    fn negative_count_is_rejected() {
        let rows = vec![cm_row("1", "1", "-3", "1")];
        assert!(build_confusion_matrices(&rows).is_err());
    }
}
