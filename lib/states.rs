//! Construction of multi-mode Fock-basis states from compact string
//! specifications.
//!
//! A specification like `"00+11"` is a signed sum of terms, each term a run
//! of digit characters. How one digit maps onto physical modes is left to a
//! [`ModeExpander`]: [`FockExpander`] reads each digit as the occupation
//! number of one mode, while [`DualRailExpander`] reads each digit as a
//! logical qubit spread over two modes. The resulting sum is divided by the
//! square root of the term count, which is exact normalization only because
//! both expanders produce orthonormal unit-norm product states.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ Zero, One };
use crate::error::{ StateError, StateResult };

/// Tensor-product layout for a composite state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Combine {
    /// Keep one array axis per mode.
    Tensor,
    /// Flatten all modes into a single axis (Kronecker product).
    Kron,
}

impl std::str::FromStr for Combine {
    type Err = StateError;

    fn from_str(s: &str) -> StateResult<Self> {
        match s {
            "tensor" => Ok(Self::Tensor),
            "kron" => Ok(Self::Kron),
            _ => Err(StateError::InvalidCombine(s.to_string())),
        }
    }
}

/// One-hot mode vector for occupation number `n` under truncation `cutoff`.
pub fn fock(n: usize, cutoff: usize) -> StateResult<nd::Array1<C64>> {
    if n >= cutoff {
        return Err(StateError::InvalidOccupation { n, cutoff });
    }
    Ok(
        (0..cutoff)
            .map(|k| if k == n { C64::one() } else { C64::zero() })
            .collect()
    )
}

/// Combine a sequence of mode vectors into a composite state.
///
/// [`Kron`][Combine::Kron] produces a single flattened axis of length
/// `prod(len_k)`; [`Tensor`][Combine::Tensor] produces one axis per mode.
/// The two hold identical data under row-major flattening.
pub fn product_state(modes: &[nd::Array1<C64>], combine: Combine)
    -> StateResult<nd::ArrayD<C64>>
{
    if modes.is_empty() {
        return Err(StateError::EmptySpec);
    }
    let mut flat: Vec<C64> = vec![C64::one()];
    for mode in modes.iter() {
        flat
            = flat.iter()
            .flat_map(|&a| mode.iter().map(move |&b| a * b))
            .collect();
    }
    let state = nd::Array1::from_vec(flat).into_dyn();
    match combine {
        Combine::Kron => Ok(state),
        Combine::Tensor => {
            let dims: Vec<usize> = modes.iter().map(|m| m.len()).collect();
            Ok(state.into_shape(nd::IxDyn(&dims)).unwrap())
        },
    }
}

/// Expansion of one specification term into a sequence of mode vectors.
///
/// Implementors define how a single digit maps onto physical modes;
/// [`state_from_spec`] is generic over this seam.
pub trait ModeExpander {
    /// Expand a run of digit characters into mode vectors.
    fn expand(&self, term: &str, cutoff: usize)
        -> StateResult<Vec<nd::Array1<C64>>>;
}

/// One mode per digit, the digit giving the occupation number directly.
#[derive(Copy, Clone, Debug, Default)]
pub struct FockExpander;

impl ModeExpander for FockExpander {
    fn expand(&self, term: &str, cutoff: usize)
        -> StateResult<Vec<nd::Array1<C64>>>
    {
        term.chars()
            .map(|ch| {
                let n: u32
                    = ch.to_digit(10)
                    .ok_or(StateError::InvalidDigit {
                        ch, context: "Fock term" })?;
                fock(n as usize, cutoff)
            })
            .collect()
    }
}

/// Two modes per digit, dual-rail encoded: logical `0` is occupation
/// `(1, 0)`, logical `1` is `(0, 1)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct DualRailExpander;

impl ModeExpander for DualRailExpander {
    fn expand(&self, term: &str, cutoff: usize)
        -> StateResult<Vec<nd::Array1<C64>>>
    {
        let occupied = fock(1, cutoff)?;
        let empty = fock(0, cutoff)?;
        let mut modes: Vec<nd::Array1<C64>>
            = Vec::with_capacity(2 * term.len());
        for ch in term.chars() {
            match ch {
                '0' => {
                    modes.push(occupied.clone());
                    modes.push(empty.clone());
                },
                '1' => {
                    modes.push(empty.clone());
                    modes.push(occupied.clone());
                },
                _ => return Err(StateError::InvalidDigit {
                    ch, context: "dual-rail term" }),
            }
        }
        Ok(modes)
    }
}

/// Parse a superposition specification like `"00+11"` into a normalized
/// composite state.
///
/// Terms are runs of digits; `'+'` and `'-'` finalize the pending term and
/// set the sign of the following one (the leading sign defaults to `+`). Any
/// other character is rejected. The result is the signed sum of the term
/// states divided by `sqrt(number of terms)`; this is exact normalization
/// only when every term expands to an orthonormal unit-norm product state,
/// which both built-in expanders guarantee.
pub fn state_from_spec<E>(
    expander: &E,
    spec: &str,
    cutoff: usize,
    combine: Combine,
) -> StateResult<nd::ArrayD<C64>>
where E: ModeExpander + ?Sized
{
    let mut terms: Vec<nd::ArrayD<C64>> = Vec::new();
    let mut mode_count: Option<usize> = None;
    let mut term = String::new();
    let mut sign: f64 = 1.0;

    let mut finalize
        = |term: &mut String, sign: f64| -> StateResult<()> {
            if term.is_empty() { return Ok(()); }
            let modes = expander.expand(term, cutoff)?;
            match mode_count {
                None => { mode_count = Some(modes.len()); },
                Some(m) if m != modes.len() => {
                    return Err(StateError::ModeCountMismatch {
                        expected: m, got: modes.len() });
                },
                Some(_) => { },
            }
            let state = product_state(&modes, combine)?;
            terms.push(state * C64::from(sign));
            term.clear();
            Ok(())
        };

    for ch in spec.chars() {
        if ch.is_ascii_digit() {
            term.push(ch);
        } else if ch == '+' || ch == '-' {
            finalize(&mut term, sign)?;
            sign = if ch == '+' { 1.0 } else { -1.0 };
        } else {
            return Err(StateError::InvalidDigit {
                ch, context: "state specification" });
        }
    }
    finalize(&mut term, sign)?;

    if terms.is_empty() {
        return Err(StateError::EmptySpec);
    }
    let norm = C64::from((terms.len() as f64).sqrt());
    let mut total: nd::ArrayD<C64>
        = nd::ArrayD::zeros(terms[0].raw_dim());
    for t in terms.into_iter() {
        total = total + t;
    }
    Ok(total / norm)
}

/// [`state_from_spec`] with each digit read as a Fock occupation number.
pub fn fock_state_from_spec(spec: &str, cutoff: usize, combine: Combine)
    -> StateResult<nd::ArrayD<C64>>
{
    state_from_spec(&FockExpander, spec, cutoff, combine)
}

/// [`state_from_spec`] with each digit read as a dual-rail logical qubit.
pub fn qubit_state_from_spec(spec: &str, cutoff: usize, combine: Combine)
    -> StateResult<nd::ArrayD<C64>>
{
    state_from_spec(&DualRailExpander, spec, cutoff, combine)
}

/// The two-qubit Bell state `00+11` in dual-rail encoding.
pub fn bell_state(cutoff: usize, combine: Combine)
    -> StateResult<nd::ArrayD<C64>>
{
    qubit_state_from_spec("00+11", cutoff, combine)
}

/// Compute the outer product `|a⟩⟨b|` of two kets.
pub fn outer_prod(a: &nd::Array1<C64>, b: &nd::Array1<C64>)
    -> nd::Array2<C64>
{
    nd::Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j].conj())
}

#[cfg(test)]
mod test {
    use super::*;

    fn approx(a: C64, b: C64) -> bool { (a - b).norm() < 1e-12 }

    fn l2_norm(psi: &nd::ArrayD<C64>) -> f64 {
        psi.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
    }

    #[test]
    fn fock_is_one_hot() {
        let v = fock(0, 5).unwrap();
        assert_eq!(v.len(), 5);
        assert!(approx(v[0], C64::one()));
        assert!(v.iter().skip(1).all(|a| a.is_zero()));
        let v = fock(3, 5).unwrap();
        assert!(approx(v[3], C64::one()));
        assert_eq!(
            fock(5, 5),
            Err(StateError::InvalidOccupation { n: 5, cutoff: 5 }),
        );
    }

    #[test]
    fn kron_and_tensor_agree() {
        let modes = [fock(1, 3).unwrap(), fock(2, 3).unwrap()];
        let kron = product_state(&modes, Combine::Kron).unwrap();
        let tensor = product_state(&modes, Combine::Tensor).unwrap();
        assert_eq!(kron.shape(), &[9]);
        assert_eq!(tensor.shape(), &[3, 3]);
        assert_eq!(tensor.into_shape(nd::IxDyn(&[9])).unwrap(), kron);
        // |1⟩|2⟩ sits at flat index 1 * 3 + 2
        assert!(approx(kron[[5]], C64::one()));
        assert_eq!(kron.iter().filter(|a| !a.is_zero()).count(), 1);
    }

    #[test]
    fn dual_rail_single_qubit() {
        let psi = qubit_state_from_spec("0", 2, Combine::Kron).unwrap();
        assert_eq!(psi.shape(), &[4]);
        // occupation (1, 0) lands at flat index 2
        psi.iter().enumerate()
            .for_each(|(k, a)| {
                if k == 2 {
                    assert!(approx(*a, C64::one()));
                } else {
                    assert!(a.is_zero());
                }
            });
    }

    #[test]
    fn bell_state_amplitudes() {
        let psi = bell_state(2, Combine::Kron).unwrap();
        assert_eq!(psi.shape(), &[16]);
        let nonzero: Vec<usize>
            = psi.iter().enumerate()
            .filter(|(_, a)| !a.is_zero())
            .map(|(k, _)| k)
            .collect();
        // dual-rail 00 = occupation (1,0,1,0) -> 10; 11 = (0,1,0,1) -> 5
        assert_eq!(nonzero, vec![5, 10]);
        let w = C64::from(0.5_f64.sqrt());
        assert!(approx(psi[[5]], w));
        assert!(approx(psi[[10]], w));
    }

    #[test]
    fn tensor_mode_keeps_axes() {
        let psi = bell_state(2, Combine::Tensor).unwrap();
        assert_eq!(psi.shape(), &[2, 2, 2, 2]);
        let flat = psi.into_shape(nd::IxDyn(&[16])).unwrap();
        assert_eq!(flat, bell_state(2, Combine::Kron).unwrap());
    }

    #[test]
    fn sign_flips_second_term() {
        let plus = qubit_state_from_spec("00+11", 2, Combine::Kron).unwrap();
        let minus = qubit_state_from_spec("00-11", 2, Combine::Kron).unwrap();
        assert!((l2_norm(&plus) - 1.0).abs() < 1e-12);
        assert!((l2_norm(&minus) - 1.0).abs() < 1e-12);
        assert!(approx(minus[[10]], plus[[10]]));
        assert!(approx(minus[[5]], -plus[[5]]));
    }

    #[test]
    fn three_term_superposition() {
        let psi = fock_state_from_spec("00-01+11", 3, Combine::Kron).unwrap();
        assert!((l2_norm(&psi) - 1.0).abs() < 1e-12);
        let w = C64::from(1.0 / 3.0_f64.sqrt());
        assert!(approx(psi[[0]], w));
        assert!(approx(psi[[1]], -w));
        assert!(approx(psi[[4]], w));
    }

    #[test]
    fn bad_specs_are_rejected() {
        assert_eq!(
            qubit_state_from_spec("", 3, Combine::Kron),
            Err(StateError::EmptySpec),
        );
        assert_eq!(
            qubit_state_from_spec("+-", 3, Combine::Kron),
            Err(StateError::EmptySpec),
        );
        assert!(matches!(
            qubit_state_from_spec("0x1", 3, Combine::Kron),
            Err(StateError::InvalidDigit { ch: 'x', .. }),
        ));
        assert!(matches!(
            qubit_state_from_spec("2", 3, Combine::Kron),
            Err(StateError::InvalidDigit { ch: '2', .. }),
        ));
        assert_eq!(
            fock_state_from_spec("00+111", 3, Combine::Kron),
            Err(StateError::ModeCountMismatch { expected: 2, got: 3 }),
        );
        assert_eq!(
            fock_state_from_spec("5", 3, Combine::Kron),
            Err(StateError::InvalidOccupation { n: 5, cutoff: 3 }),
        );
    }

    #[test]
    fn combine_from_str() {
        assert_eq!("tensor".parse::<Combine>(), Ok(Combine::Tensor));
        assert_eq!("kron".parse::<Combine>(), Ok(Combine::Kron));
        assert!(matches!(
            "outer".parse::<Combine>(),
            Err(StateError::InvalidCombine(_)),
        ));
    }

    #[test]
    fn outer_prod_conjugates_bra() {
        let a: nd::Array1<C64>
            = nd::array![C64::new(1.0, 1.0), C64::new(0.0, 0.0)];
        let rho = outer_prod(&a, &a);
        assert!(approx(rho[[0, 0]], C64::from(2.0)));
        assert!(rho[[0, 1]].is_zero());
        assert!(rho[[1, 0]].is_zero());
    }
}
