//! TSPLIB problem reader.
//!
//! ```text
//! NAME : br5
//! TYPE : ATSP
//! DIMENSION : 5
//! EDGE_WEIGHT_TYPE : EXPLICIT
//! EDGE_WEIGHT_FORMAT : FULL_MATRIX
//! EDGE_WEIGHT_SECTION
//!  0 20 30 10 11
//!  ...
//! EOF
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TspError, TspResult};
use crate::matrix::CostMatrix;

/// Value of the `TYPE` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProblemType {
    /// Symmetric problem.
    Tsp,
    /// Asymmetric problem.
    Atsp,
}

impl ProblemType {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "TSP" => Some(Self::Tsp),
            "ATSP" => Some(Self::Atsp),
            _ => None,
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tsp => write!(f, "TSP"),
            Self::Atsp => write!(f, "ATSP"),
        }
    }
}

/// Value of the `EDGE_WEIGHT_FORMAT` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeWeightFormat {
    /// Every cell, row by row.
    FullMatrix,
    /// Strict upper triangle, row by row.
    UpperRow,
    /// Strict lower triangle, row by row.
    LowerRow,
    /// Upper triangle with diagonal, row by row.
    UpperDiagRow,
    /// Lower triangle with diagonal, row by row.
    LowerDiagRow,
    /// Strict upper triangle, column by column.
    UpperCol,
    /// Strict lower triangle, column by column.
    LowerCol,
    /// Upper triangle with diagonal, column by column.
    UpperDiagCol,
    /// Lower triangle with diagonal, column by column.
    LowerDiagCol,
}

/// Cell order of a weight list; column formats read as their mirrored row format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Full,
    Upper,
    Lower,
    UpperDiag,
    LowerDiag,
}

impl EdgeWeightFormat {
    const ALL: [Self; 9] = [
        Self::FullMatrix,
        Self::UpperRow,
        Self::LowerRow,
        Self::UpperDiagRow,
        Self::LowerDiagRow,
        Self::UpperCol,
        Self::LowerCol,
        Self::UpperDiagCol,
        Self::LowerDiagCol,
    ];

    /// The TSPLIB spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullMatrix => "FULL_MATRIX",
            Self::UpperRow => "UPPER_ROW",
            Self::LowerRow => "LOWER_ROW",
            Self::UpperDiagRow => "UPPER_DIAG_ROW",
            Self::LowerDiagRow => "LOWER_DIAG_ROW",
            Self::UpperCol => "UPPER_COL",
            Self::LowerCol => "LOWER_COL",
            Self::UpperDiagCol => "UPPER_DIAG_COL",
            Self::LowerDiagCol => "LOWER_DIAG_COL",
        }
    }

    fn from_keyword(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }

    const fn layout(self) -> Layout {
        match self {
            Self::FullMatrix => Layout::Full,
            Self::UpperRow | Self::LowerCol => Layout::Upper,
            Self::LowerRow | Self::UpperCol => Layout::Lower,
            Self::UpperDiagRow | Self::LowerDiagCol => Layout::UpperDiag,
            Self::LowerDiagRow | Self::UpperDiagCol => Layout::LowerDiag,
        }
    }

    /// Whether each weight stands for both directions of an edge.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        !matches!(self, Self::FullMatrix)
    }

    /// Number of weights a problem of `dimension` cities lists.
    ///
    /// `None` if the count does not fit in `usize`.
    #[must_use]
    pub fn weight_count(self, dimension: usize) -> Option<usize> {
        match self.layout() {
            Layout::Full => dimension.checked_mul(dimension),
            Layout::Upper | Layout::Lower => dimension
                .checked_mul(dimension.saturating_sub(1))
                .map(|c| c / 2),
            Layout::UpperDiag | Layout::LowerDiag => dimension
                .checked_add(1)
                .and_then(|d| d.checked_mul(dimension))
                .map(|c| c / 2),
        }
    }

    /// Matrix cells in the order the weights are listed.
    fn cells(self, n: usize) -> Vec<(usize, usize)> {
        let layout = self.layout();
        (0..n)
            .flat_map(|i| {
                let cols = match layout {
                    Layout::Full => 0..n,
                    Layout::Upper => i + 1..n,
                    Layout::Lower => 0..i,
                    Layout::UpperDiag => i..n,
                    Layout::LowerDiag => 0..i + 1,
                };
                cols.map(move |j| (i, j))
            })
            .collect()
    }
}

impl fmt::Display for EdgeWeightFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicit-weight TSPLIB problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsplibProblem {
    /// `NAME`, empty if absent.
    pub name: String,
    /// `TYPE`, if given.
    pub kind: Option<ProblemType>,
    /// `COMMENT`, if given.
    pub comment: Option<String>,
    /// `DIMENSION`.
    pub dimension: usize,
    /// `EDGE_WEIGHT_FORMAT`.
    pub edge_weight_format: EdgeWeightFormat,
    /// Contents of `EDGE_WEIGHT_SECTION` in file order.
    pub weights: Vec<i64>,
}

/// Keyword values collected while reading.
#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    kind: Option<ProblemType>,
    comment: Option<String>,
    dimension: Option<usize>,
    format: Option<EdgeWeightFormat>,
}

impl Header {
    fn apply(&mut self, keyword: &str, value: &str, line: usize) -> TspResult<()> {
        match keyword {
            "NAME" => self.name = Some(value.to_string()),
            "TYPE" => {
                self.kind = Some(
                    ProblemType::from_keyword(value)
                        .ok_or_else(|| TspError::unsupported(keyword, value))?,
                );
            }
            "COMMENT" => self.comment = Some(value.to_string()),
            "DIMENSION" => {
                let dimension = value
                    .parse::<usize>()
                    .ok()
                    .filter(|&d| d > 0)
                    .ok_or_else(|| {
                        TspError::tsplib(line, format!("DIMENSION '{value}' is not a positive integer"))
                    })?;
                // Every format must be able to count its weights.
                if dimension.checked_add(1).and_then(|d| d.checked_mul(dimension)).is_none() {
                    return Err(TspError::tsplib(line, format!("DIMENSION {dimension} is too large")));
                }
                self.dimension = Some(dimension);
            }
            "EDGE_WEIGHT_TYPE" => {
                if value != "EXPLICIT" {
                    return Err(TspError::unsupported(keyword, value));
                }
            }
            "EDGE_WEIGHT_FORMAT" => {
                self.format = Some(
                    EdgeWeightFormat::from_keyword(value)
                        .ok_or_else(|| TspError::unsupported(keyword, value))?,
                );
            }
            "DISPLAY_DATA_TYPE" => {}
            _ => {
                return Err(TspError::tsplib(line, format!("unknown keyword '{keyword}'")));
            }
        }
        Ok(())
    }
}

impl TsplibProblem {
    /// Parse a problem from TSPLIB text.
    ///
    /// Reading stops at `EOF` or `DISPLAY_DATA_SECTION`.
    ///
    /// # Errors
    ///
    /// Returns error on unknown keywords, unsupported values, malformed
    /// weights, missing `DIMENSION`/`EDGE_WEIGHT_FORMAT` or a weight count
    /// that does not match them.
    pub fn parse(input: &str) -> TspResult<Self> {
        let mut header = Header::default();
        let mut weights = Vec::new();
        let mut in_weights = false;

        for (index, raw) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if line == "EOF" || line == "DISPLAY_DATA_SECTION" {
                break;
            }
            if line == "EDGE_WEIGHT_SECTION" {
                in_weights = true;
                continue;
            }
            if let Some((keyword, value)) = line.split_once(':') {
                in_weights = false;
                header.apply(keyword.trim(), value.trim(), line_no)?;
                continue;
            }
            if !in_weights {
                return Err(TspError::tsplib(line_no, format!("unexpected line '{line}'")));
            }
            for token in line.split_whitespace() {
                let weight = token.parse::<i64>().map_err(|_| {
                    TspError::tsplib(line_no, format!("'{token}' is not an integer weight"))
                })?;
                weights.push(weight);
            }
        }

        let dimension = header.dimension.ok_or(TspError::MissingKeyword("DIMENSION"))?;
        let edge_weight_format = header
            .format
            .ok_or(TspError::MissingKeyword("EDGE_WEIGHT_FORMAT"))?;

        let problem = Self {
            name: header.name.unwrap_or_default(),
            kind: header.kind,
            comment: header.comment,
            dimension,
            edge_weight_format,
            weights,
        };
        problem.check_weight_count()?;
        Ok(problem)
    }

    /// Read and parse a problem file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> TspResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn check_weight_count(&self) -> TspResult<()> {
        let expected = self
            .edge_weight_format
            .weight_count(self.dimension)
            .ok_or_else(|| TspError::unsupported("DIMENSION", self.dimension.to_string()))?;
        if self.weights.len() == expected {
            Ok(())
        } else {
            Err(TspError::WeightCount {
                expected,
                got: self.weights.len(),
            })
        }
    }

    /// Decode the weights into a `dimension` x `dimension` cost matrix.
    ///
    /// The diagonal, and any cell the format does not cover, holds `no_edge`.
    ///
    /// # Errors
    ///
    /// Returns `TspError::WeightCount` if the weight list does not fit.
    pub fn to_matrix(&self, no_edge: i64) -> TspResult<CostMatrix<i64>> {
        self.check_weight_count()?;
        let n = self.dimension;
        let symmetric = self.edge_weight_format.is_symmetric();
        let mut matrix = CostMatrix::filled(n, n, no_edge);

        for ((i, j), &weight) in self.edge_weight_format.cells(n).into_iter().zip(&self.weights) {
            if i == j {
                continue;
            }
            matrix.set(i, j, weight)?;
            if symmetric {
                matrix.set(j, i, weight)?;
            }
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EDGE: i64 = 999_999_999;

    fn problem(format: &str, dimension: usize, weights: &str) -> String {
        format!(
            "NAME : sample\nTYPE : TSP\nCOMMENT : test data\nDIMENSION : {dimension}\n\
             EDGE_WEIGHT_TYPE : EXPLICIT\nEDGE_WEIGHT_FORMAT : {format}\n\
             EDGE_WEIGHT_SECTION\n{weights}\nEOF\n"
        )
    }

    fn symmetric_four() -> CostMatrix<i64> {
        CostMatrix::from_rows(
            vec![
                vec![NO_EDGE, 1, 2, 3],
                vec![1, NO_EDGE, 4, 5],
                vec![2, 4, NO_EDGE, 6],
                vec![3, 5, 6, NO_EDGE],
            ],
            NO_EDGE,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_header() {
        let p = TsplibProblem::parse(&problem("UPPER_ROW", 4, "1 2 3\n4 5\n6")).unwrap();
        assert_eq!(p.name, "sample");
        assert_eq!(p.kind, Some(ProblemType::Tsp));
        assert_eq!(p.comment.as_deref(), Some("test data"));
        assert_eq!(p.dimension, 4);
        assert_eq!(p.edge_weight_format, EdgeWeightFormat::UpperRow);
        assert_eq!(p.weights, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_full_matrix_keeps_direction() {
        let text = problem("FULL_MATRIX", 3, "0 1 2\n3 0 4\n5 6 0");
        let m = TsplibProblem::parse(&text).unwrap().to_matrix(NO_EDGE).unwrap();
        assert_eq!(m.row(0).unwrap(), &[NO_EDGE, 1, 2]);
        assert_eq!(m.row(1).unwrap(), &[3, NO_EDGE, 4]);
        assert_eq!(m.row(2).unwrap(), &[5, 6, NO_EDGE]);
    }

    #[test]
    fn test_triangular_formats_decode_alike() {
        let cases = [
            ("UPPER_ROW", "1 2 3 4 5 6"),
            ("LOWER_COL", "1 2 3 4 5 6"),
            ("LOWER_ROW", "1 2 4 3 5 6"),
            ("UPPER_COL", "1 2 4 3 5 6"),
            ("UPPER_DIAG_ROW", "0 1 2 3 0 4 5 0 6 0"),
            ("LOWER_DIAG_COL", "0 1 2 3 0 4 5 0 6 0"),
            ("LOWER_DIAG_ROW", "0 1 0 2 4 0 3 5 6 0"),
            ("UPPER_DIAG_COL", "0 1 0 2 4 0 3 5 6 0"),
        ];
        for (format, weights) in cases {
            let m = TsplibProblem::parse(&problem(format, 4, weights))
                .unwrap()
                .to_matrix(NO_EDGE)
                .unwrap();
            assert_eq!(m, symmetric_four(), "format {format}");
        }
    }

    #[test]
    fn test_weights_may_span_lines_arbitrarily() {
        let a = TsplibProblem::parse(&problem("UPPER_ROW", 4, "1 2 3 4 5 6")).unwrap();
        let b = TsplibProblem::parse(&problem("UPPER_ROW", 4, "1\n2 3 4\n\n5\n6")).unwrap();
        assert_eq!(a.weights, b.weights);
    }

    #[test]
    fn test_custom_sentinel_on_diagonal() {
        let m = TsplibProblem::parse(&problem("UPPER_ROW", 2, "7"))
            .unwrap()
            .to_matrix(-1)
            .unwrap();
        assert_eq!(m.get(0, 0).unwrap(), -1);
        assert_eq!(m.get(0, 1).unwrap(), 7);
        assert_eq!(m.get(1, 0).unwrap(), 7);
    }

    #[test]
    fn test_display_data_section_ends_input() {
        let text = "DIMENSION : 2\nEDGE_WEIGHT_FORMAT : UPPER_ROW\nEDGE_WEIGHT_SECTION\n9\n\
                    DISPLAY_DATA_SECTION\n1 0.0 1.0\n";
        let p = TsplibProblem::parse(text).unwrap();
        assert_eq!(p.weights, vec![9]);
        assert_eq!(p.name, "");
        assert_eq!(p.kind, None);
    }

    #[test]
    fn test_display_data_type_is_ignored() {
        let text = "DIMENSION : 2\nDISPLAY_DATA_TYPE : TWOD_DISPLAY\n\
                    EDGE_WEIGHT_FORMAT : UPPER_ROW\nEDGE_WEIGHT_SECTION\n4\n";
        assert!(TsplibProblem::parse(text).is_ok());
    }

    #[test]
    fn test_unknown_keyword_names_line() {
        let text = "NAME : x\nCAPACITY : 10\n";
        let err = TsplibProblem::parse(text).unwrap_err();
        assert!(matches!(
            &err,
            TspError::Tsplib { line: 2, message } if message.contains("CAPACITY")
        ));
    }

    #[test]
    fn test_unsupported_values() {
        let bad_type = "TYPE : CVRP\n";
        assert!(matches!(
            TsplibProblem::parse(bad_type),
            Err(TspError::Unsupported { keyword, value }) if keyword == "TYPE" && value == "CVRP"
        ));

        let coordinates = "EDGE_WEIGHT_TYPE : EUC_2D\n";
        assert!(matches!(
            TsplibProblem::parse(coordinates),
            Err(TspError::Unsupported { .. })
        ));

        let format = "EDGE_WEIGHT_FORMAT : FUNCTION\n";
        assert!(matches!(
            TsplibProblem::parse(format),
            Err(TspError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_bad_dimension() {
        for value in ["zero", "0", "-3"] {
            let text = format!("DIMENSION : {value}\n");
            assert!(matches!(
                TsplibProblem::parse(&text),
                Err(TspError::Tsplib { line: 1, .. })
            ));
        }
    }

    #[test]
    fn test_missing_keywords() {
        let no_dimension = "EDGE_WEIGHT_FORMAT : FULL_MATRIX\nEDGE_WEIGHT_SECTION\n0\n";
        assert!(matches!(
            TsplibProblem::parse(no_dimension),
            Err(TspError::MissingKeyword("DIMENSION"))
        ));

        let no_format = "DIMENSION : 1\nEDGE_WEIGHT_SECTION\n0\n";
        assert!(matches!(
            TsplibProblem::parse(no_format),
            Err(TspError::MissingKeyword("EDGE_WEIGHT_FORMAT"))
        ));
    }

    #[test]
    fn test_weight_count_mismatch() {
        let result = TsplibProblem::parse(&problem("FULL_MATRIX", 3, "1 2 3 4"));
        assert!(matches!(
            result,
            Err(TspError::WeightCount {
                expected: 9,
                got: 4
            })
        ));
    }

    #[test]
    fn test_non_integer_weight() {
        let result = TsplibProblem::parse(&problem("UPPER_ROW", 2, "1.5"));
        assert!(matches!(result, Err(TspError::Tsplib { line: 8, .. })));
    }

    #[test]
    fn test_stray_line_outside_section() {
        let result = TsplibProblem::parse("NAME : a\nNODE_COORD_SECTION\n");
        assert!(matches!(result, Err(TspError::Tsplib { line: 2, .. })));
    }

    #[test]
    fn test_weight_counts() {
        assert_eq!(EdgeWeightFormat::FullMatrix.weight_count(5), Some(25));
        assert_eq!(EdgeWeightFormat::UpperRow.weight_count(5), Some(10));
        assert_eq!(EdgeWeightFormat::LowerDiagRow.weight_count(5), Some(15));
        assert_eq!(EdgeWeightFormat::UpperRow.weight_count(1), Some(0));
        assert_eq!(EdgeWeightFormat::FullMatrix.weight_count(usize::MAX), None);
        assert_eq!(EdgeWeightFormat::UpperDiagRow.weight_count(usize::MAX), None);
    }

    #[test]
    fn test_huge_dimension_rejected() {
        let text = problem("FULL_MATRIX", 9_999_999_999_999, "1 2 3");
        assert!(matches!(
            TsplibProblem::parse(&text),
            Err(TspError::Tsplib { line: 4, ref message }) if message.contains("too large")
        ));
    }

    #[test]
    fn test_huge_dimension_rejected_when_built_directly() {
        let problem = TsplibProblem {
            name: String::new(),
            kind: None,
            comment: None,
            dimension: usize::MAX,
            edge_weight_format: EdgeWeightFormat::FullMatrix,
            weights: vec![1],
        };
        assert!(matches!(
            problem.to_matrix(NO_EDGE),
            Err(TspError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_format_spelling_round_trips() {
        for format in EdgeWeightFormat::ALL {
            assert_eq!(EdgeWeightFormat::from_keyword(format.as_str()), Some(format));
            assert_eq!(format.to_string(), format.as_str());
        }
        assert_eq!(ProblemType::Atsp.to_string(), "ATSP");
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            TsplibProblem::from_file("/nonexistent/problem.tsp"),
            Err(TspError::Io(_))
        ));
    }
}
