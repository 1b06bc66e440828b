use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use super::feature::*;
use crate::error::{RangeError, Result};


/// Struct `Sample` holds the dimensions of a dataset as dense columns
/// and the selection as binary target.
#[derive(Debug, Clone)]
pub struct Sample {
    name_to_index: HashMap<String, usize>,
    features: Vec<Feature>,
    target: Vec<bool>,
    n_sample: usize,
    n_feature: usize,
}


impl Sample {
    /// Project `data` onto `dimensions` and attach `selection` as target.
    ///
    /// Fails if `data` is empty, if `selection` does not have
    /// one entry per row, or if a dimension is missing, duplicated,
    /// or holds a non-numeric value.
    pub fn from_dataframe<S>(
        data: &DataFrame,
        dimensions: &[S],
        selection: &[bool],
    ) -> Result<Self>
        where S: AsRef<str> + Sync,
    {
        let n_sample = data.height();
        if n_sample == 0 {
            return Err(RangeError::InputShape(
                "the dataset has no rows".to_string()
            ));
        }
        if selection.len() != n_sample {
            return Err(RangeError::InputShape(format!(
                "the selection has {} entries, but the dataset has {} rows",
                selection.len(),
                n_sample,
            )));
        }
        if dimensions.is_empty() {
            return Err(RangeError::InputShape(
                "no dimension is given".to_string()
            ));
        }

        let features = dimensions.par_iter()
            .map(|name| {
                let name = name.as_ref();
                let series = data.column(name)
                    .map_err(|_| RangeError::UnknownDimension(name.to_string()))?;
                Feature::from_series(series)
            })
            .collect::<Result<Vec<_>>>()?;

        let n_feature = features.len();
        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();
        if name_to_index.len() != n_feature {
            return Err(RangeError::InputShape(
                "the dimensions contain a duplicated column".to_string()
            ));
        }

        let target = selection.to_vec();
        let sample = Self {
            name_to_index, features, target, n_sample, n_feature,
        };
        Ok(sample)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature named `name`, if any.
    pub fn feature<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }


    /// Returns the selection.
    pub fn target(&self) -> &[bool] {
        &self.target[..]
    }


    /// Returns the indices of the selected rows in ascending order.
    pub fn selected_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.target.iter()
            .enumerate()
            .filter_map(|(row, &selected)| selected.then_some(row))
    }


    /// Returns `true` if the selection is entirely true
    /// or entirely false.
    pub fn is_single_class(&self) -> bool {
        let n_selected = self.selected_rows().count();
        n_selected == 0 || n_selected == self.n_sample
    }


    /// Returns the `idx`-th instance `(x, y)`.
    pub fn at(&self, idx: usize) -> (Vec<f64>, bool) {
        let x = self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>();
        let y = self.target[idx];

        (x, y)
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        self.feature(name)
            .unwrap_or_else(|| panic!("The feature named `{name}` does not exist"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> DataFrame {
        DataFrame::new(vec![
            Series::new("id", &[10_i64, 11, 12, 13]),
            Series::new("x", &[0.1, 0.2, 0.3, 0.4]),
            Series::new("y", &[3_i32, 1, 4, 1]),
        ]).unwrap()
    }

    #[test]
    fn test_from_dataframe_projects_dimensions() {
        let data = dataset();
        let selection = [true, false, true, false];
        let sample = Sample::from_dataframe(&data, &["y", "x"], &selection)
            .unwrap();

        assert_eq!(sample.shape(), (4, 2));
        assert_eq!(sample.features()[0].name(), "y");
        assert_eq!(sample["x"][2], 0.3);
        assert_eq!(sample.at(1), (vec![1f64, 0.2], false));
        assert_eq!(sample.selected_rows().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!sample.is_single_class());
    }

    #[test]
    fn test_from_dataframe_rejects_length_mismatch() {
        let data = dataset();
        let err = Sample::from_dataframe(&data, &["x"], &[true, false])
            .unwrap_err();
        assert!(matches!(err, RangeError::InputShape(_)), "got {err:?}");
    }

    #[test]
    fn test_from_dataframe_rejects_unknown_dimension() {
        let data = dataset();
        let selection = [true; 4];
        let err = Sample::from_dataframe(&data, &["x", "z"], &selection)
            .unwrap_err();
        assert!(
            matches!(err, RangeError::UnknownDimension(ref name) if name == "z"),
            "got {err:?}"
        );
    }

    #[test]
    fn test_from_dataframe_rejects_empty_dimensions() {
        let data = dataset();
        let dimensions: [&str; 0] = [];
        let err = Sample::from_dataframe(&data, &dimensions, &[true; 4])
            .unwrap_err();
        assert!(matches!(err, RangeError::InputShape(_)), "got {err:?}");
    }

    #[test]
    fn test_single_class() {
        let data = dataset();
        let sample = Sample::from_dataframe(&data, &["x"], &[false; 4])
            .unwrap();
        assert!(sample.is_single_class());
        assert_eq!(sample.selected_rows().count(), 0);
    }
}
