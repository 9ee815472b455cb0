use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

use num_traits::Zero;

#[derive(Clone, Debug, PartialEq)]
pub struct Array1<T> {
    data: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array1<U>
    where
        F: FnMut(&T) -> U,
    {
        Array1::from_vec(self.data.iter().map(|v| f(v)).collect())
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }
}

impl<T> Array1<T>
where
    T: Clone,
{
    pub fn from_elem(len: usize, value: T) -> Self {
        Array1::from_vec(vec![value; len])
    }
}

impl<T> Array1<T>
where
    T: Clone + Zero,
{
    pub fn zeros(len: usize) -> Self {
        Array1::from_vec(vec![T::zero(); len])
    }
}

impl<T> From<Vec<T>> for Array1<T> {
    fn from(value: Vec<T>) -> Self {
        Array1::from_vec(value)
    }
}

impl<T> From<Array1<T>> for Vec<T> {
    fn from(value: Array1<T>) -> Self {
        value.data
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array1<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Array1<f64> {
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Index of the largest value. Equal values resolve to the lowest index
    /// and NaN entries are never selected. Returns `None` for an empty array
    /// or one holding only NaN.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (idx, &value) in self.data.iter().enumerate() {
            if value.is_nan() {
                continue;
            }
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((idx, value)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Numerically stable softmax: the maximum is subtracted before
    /// exponentiating. Entries equal to `-inf` map to exactly 0.
    pub fn softmax(&self) -> Array1<f64> {
        let max = self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            // every entry is -inf (or the array is empty): fall back to uniform
            let n = self.len().max(1) as f64;
            return Array1::from_elem(self.len(), 1.0 / n);
        }
        let exp: Array1<f64> = self.mapv(|&v| (v - max).exp());
        let total = exp.sum();
        exp.mapv(|&v| v / total)
    }
}

impl<T: fmt::Display> fmt::Display for Array1<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        let a = Array1::from_vec(vec![-1.5, 2.0, 2.0, 0.0]);
        assert_eq!(a.argmax(), Some(1));
    }

    #[test]
    fn argmax_skips_nan_and_handles_neg_infinity() {
        let a = Array1::from_vec(vec![f64::NAN, f64::NEG_INFINITY, -3.0]);
        assert_eq!(a.argmax(), Some(2));

        let all_neg_inf = Array1::from_vec(vec![f64::NEG_INFINITY, f64::NEG_INFINITY]);
        assert_eq!(all_neg_inf.argmax(), Some(0));

        let empty: Array1<f64> = Array1::from_vec(vec![]);
        assert_eq!(empty.argmax(), None);
    }

    #[test]
    fn softmax_sums_to_one() {
        let a = Array1::from_vec(vec![1.0, 2.0, 3.0]);
        let probs = a.softmax();
        assert!((probs.sum() - 1.0).abs() < 1e-12);
        for &p in probs.iter() {
            assert!((0.0..=1.0).contains(&p));
        }
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn softmax_survives_large_magnitudes() {
        let a = Array1::from_vec(vec![-1000.0, -1001.0, f64::NEG_INFINITY]);
        let probs = a.softmax();
        assert!((probs.sum() - 1.0).abs() < 1e-12);
        assert_eq!(probs[2], 0.0);
        assert!(probs[0] > 0.7);
    }
}
