//! Heralding masks that project out basis states failing a post-selection
//! condition.
//!
//! Each mask zeroes amplitudes (ket) or full rows and columns (density
//! matrix, grouped layout) in place and leaves the array unnormalized;
//! renormalizing is the caller's job. Basis states are addressed through the
//! mixed-radix encoding of [`flat_index`], most-significant mode first, with
//! every mode truncated at a common `cutoff`. All masks are idempotent.

use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ Zero, One };
use crate::error::{ StateError, StateResult };

/// Flat index of an occupation tuple under mixed-radix encoding with radix
/// `cutoff`, most-significant mode first.
pub fn flat_index(occ: &[usize], cutoff: usize) -> usize {
    occ.iter().fold(0, |acc, &i| acc * cutoff + i)
}

fn check_dim(got: usize, cutoff: usize, num_modes: u32)
    -> StateResult<usize>
{
    let dim = cutoff.pow(num_modes);
    if got != dim {
        return Err(StateError::ShapeMismatch {
            expected: format!("{} = {}^{} per axis", dim, cutoff, num_modes),
            got: format!("{}", got),
        });
    }
    Ok(dim)
}

fn zero_row_col(rho: &mut nd::Array2<C64>, idx: usize) {
    rho.row_mut(idx).fill(C64::zero());
    rho.column_mut(idx).fill(C64::zero());
}

/// Zero every 4-mode amplitude whose occupation is `(i, j, 0, 0)` or
/// `(0, 0, i, j)` for any `i`, `j`: a dual-rail qubit pair is discarded
/// whenever either photon pair is empty.
pub fn herald_dual_pair_ket(psi: &mut nd::Array1<C64>, cutoff: usize)
    -> StateResult<()>
{
    check_dim(psi.len(), cutoff, 4)?;
    for (i, j) in (0..cutoff).cartesian_product(0..cutoff) {
        psi[flat_index(&[i, j, 0, 0], cutoff)] = C64::zero();
        psi[flat_index(&[0, 0, i, j], cutoff)] = C64::zero();
    }
    Ok(())
}

/// Density-matrix form of [`herald_dual_pair_ket`]: zero the full row and
/// full column at every masked basis index of a grouped-layout 4-mode
/// operator.
pub fn herald_dual_pair_dm(rho: &mut nd::Array2<C64>, cutoff: usize)
    -> StateResult<()>
{
    check_dim(rho.nrows(), cutoff, 4)?;
    check_dim(rho.ncols(), cutoff, 4)?;
    for (i, j) in (0..cutoff).cartesian_product(0..cutoff) {
        zero_row_col(rho, flat_index(&[i, j, 0, 0], cutoff));
        zero_row_col(rho, flat_index(&[0, 0, i, j], cutoff));
    }
    Ok(())
}

/// Zero every 4-mode basis state of a grouped-layout operator holding fewer
/// than two photons in total.
///
/// Only occupation tuples with every component in `{0, 1}` can hold fewer
/// than two photons, so the scan is restricted to those; `cutoff` must be at
/// least 2 for such tuples to be addressable.
pub fn herald_min_two_photons_dm(rho: &mut nd::Array2<C64>, cutoff: usize)
    -> StateResult<()>
{
    if cutoff < 2 {
        return Err(StateError::InvalidOccupation { n: 1, cutoff });
    }
    check_dim(rho.nrows(), cutoff, 4)?;
    check_dim(rho.ncols(), cutoff, 4)?;
    for occ in (0..4).map(|_| 0..2_usize).multi_cartesian_product() {
        if occ.iter().sum::<usize>() < 2 {
            zero_row_col(rho, flat_index(&occ, cutoff));
        }
    }
    Ok(())
}

/// Zero every 8-mode basis state of a grouped-layout operator whose herald
/// modes (the last two) are not both occupied.
///
/// This is the heralding condition of a polarizing-beam-splitter CNOT: the
/// two reference modes, the four gate modes, and the partner herald are left
/// free, and a basis state is discarded exactly when its 7th or 8th
/// occupation number is 0.
pub fn herald_pbs_cnot_dm(rho: &mut nd::Array2<C64>, cutoff: usize)
    -> StateResult<()>
{
    let dim = check_dim(rho.nrows(), cutoff, 8)?;
    check_dim(rho.ncols(), cutoff, 8)?;
    for idx in 0..dim {
        let h1 = idx % cutoff;
        let h0 = (idx / cutoff) % cutoff;
        if h0 == 0 || h1 == 0 {
            zero_row_col(rho, idx);
        }
    }
    Ok(())
}
