//! Small conveniences for driver binaries.

/// Construct a [`Complex64`][num_complex::Complex64] from real and/or
/// imaginary parts.
///
/// ```ignore
/// let z = c!(1.0);        // 1 + 0i
/// let z = c!(i 2.0);      // 0 + 2i
/// let z = c!(1.0, -2.0);  // 1 - 2i
/// ```
#[macro_export]
macro_rules! c {
    ( i $im:expr ) => { ::num_complex::Complex64::new(0.0, $im) };
    ( $re:expr ) => { ::num_complex::Complex64::new($re, 0.0) };
    ( $re:expr, $im:expr ) => { ::num_complex::Complex64::new($re, $im) };
}

/// Create a directory and all of its parents, panicking on failure.
#[macro_export]
macro_rules! mkdir {
    ( $dir:expr ) => {
        {
            let dir = &$dir;
            ::std::fs::create_dir_all(dir)
                .unwrap_or_else(|err| {
                    panic!("couldn't create directory {:?}: {}", dir, err)
                });
        }
    }
}

/// Write named arrays to an npz archive, panicking on failure.
///
/// Array names are `&str`s; arrays are passed by reference.
///
/// ```ignore
/// write_npz!(
///     outdir.join("data.npz"),
///     arrays: {
///         "psi" => &psi,
///         "rho" => &rho,
///     }
/// );
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $path:expr,
        arrays: { $( $name:expr => $arr:expr ),* $(,)? } $(,)?
    ) => {
        {
            let path = &$path;
            let mut npz
                = ::ndarray_npy::NpzWriter::new(
                    ::std::fs::File::create(path)
                        .unwrap_or_else(|err| {
                            panic!("couldn't create file {:?}: {}",
                                path, err)
                        })
                );
            $(
                let name: &str = $name;
                npz.add_array(name, $arr)
                    .unwrap_or_else(|err| {
                        panic!("couldn't write array '{}': {}", name, err)
                    });
            )*
            if let Err(err) = npz.finish() {
                panic!("couldn't finalize {:?}: {}", path, err);
            }
        }
    }
}
