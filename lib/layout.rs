//! Conversion between the interleaved and grouped index layouts of a
//! multi-mode density matrix.
//!
//! An `N`-mode operator truncated at `cutoff` can be stored either as an
//! order-`2N` tensor whose axes alternate row and column indices per mode,
//! `(row_1, col_1, ..., row_N, col_N)`, or as a flattened square matrix
//! whose axes group all rows before all columns,
//! `(row_1 .. row_N, col_1 .. col_N)`. The two differ only by an axis
//! permutation: conversion relabels every element exactly once and never
//! performs arithmetic on it, so a round trip reproduces the input
//! bit-for-bit.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::error::{ StateError, StateResult };

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Symbolic axis labels for an `n`-mode operator: the interleaved string
/// (`"aAbB"` for `n = 2`) and the grouped string (`"abAB"`), one
/// lowercase/uppercase pair per mode.
pub fn mode_labels(n: usize) -> StateResult<(String, String)> {
    if n == 0 || n > 26 {
        return Err(StateError::TooManyModes { n });
    }
    let interleaved: String
        = LOWER.chars().zip(UPPER.chars())
        .take(n)
        .flat_map(|(lo, up)| [lo, up])
        .collect();
    let grouped: String
        = LOWER.chars().take(n)
        .chain(UPPER.chars().take(n))
        .collect();
    Ok((interleaved, grouped))
}

/// Einsum-style relabeling from interleaved to grouped axis order; `n = 4`
/// gives `"aAbBcCdD->abcdABCD"`.
pub fn grouping_einstr(n: usize) -> StateResult<String> {
    let (interleaved, grouped) = mode_labels(n)?;
    Ok(format!("{}->{}", interleaved, grouped))
}

/// Einsum-style relabeling from grouped to interleaved axis order; `n = 4`
/// gives `"abcdABCD->aAbBcCdD"`.
pub fn interleaving_einstr(n: usize) -> StateResult<String> {
    let (interleaved, grouped) = mode_labels(n)?;
    Ok(format!("{}->{}", grouped, interleaved))
}

// axis k of the grouped tensor draws from interleaved axis perm[k]
fn grouping_perm(n: usize) -> Vec<usize> {
    (0..n).map(|k| 2 * k)
        .chain((0..n).map(|k| 2 * k + 1))
        .collect()
}

// axis k of the interleaved tensor draws from grouped axis perm[k]
fn interleaving_perm(n: usize) -> Vec<usize> {
    (0..n).flat_map(|k| [k, n + k]).collect()
}

/// Permute an interleaved-layout operator into grouped axis order and
/// flatten it into a `(cutoff^n, cutoff^n)` matrix.
///
/// The input must carry `2n` axes of one common length, which fixes
/// `cutoff`.
pub fn to_grouped(rho: nd::ArrayD<C64>, n: usize)
    -> StateResult<nd::Array2<C64>>
{
    if n == 0 || n > 26 {
        return Err(StateError::TooManyModes { n });
    }
    let shape: Vec<usize> = rho.shape().to_vec();
    if shape.len() != 2 * n || shape.windows(2).any(|w| w[0] != w[1]) {
        return Err(StateError::ShapeMismatch {
            expected: format!("{} axes of equal length", 2 * n),
            got: format!("{:?}", shape),
        });
    }
    let cutoff = shape[0];
    let dim = cutoff.pow(n as u32);
    let grouped = rho.permuted_axes(nd::IxDyn(&grouping_perm(n)));
    let grouped = grouped.as_standard_layout().into_owned();
    Ok(grouped.into_shape((dim, dim)).unwrap())
}

/// Unflatten a grouped-layout matrix into `2n` axes of length `cutoff` and
/// permute back to interleaved axis order.
pub fn to_interleaved(rho: nd::Array2<C64>, cutoff: usize, n: usize)
    -> StateResult<nd::ArrayD<C64>>
{
    if n == 0 || n > 26 {
        return Err(StateError::TooManyModes { n });
    }
    let dim = cutoff.pow(n as u32);
    if rho.shape() != [dim, dim] {
        return Err(StateError::ShapeMismatch {
            expected: format!("({}, {})", dim, dim),
            got: format!("{:?}", rho.shape()),
        });
    }
    let grouped
        = rho.as_standard_layout().into_owned()
        .into_shape(nd::IxDyn(&vec![cutoff; 2 * n]))
        .unwrap();
    let interleaved = grouped.permuted_axes(nd::IxDyn(&interleaving_perm(n)));
    Ok(interleaved.as_standard_layout().into_owned())
}
