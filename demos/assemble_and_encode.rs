use coomat::{SymmetricSparseMatrix, decode_vector, encode_matrix_with_vector};

fn main() {
    let n = 5;
    // symmetric tridiagonal stiffness matrix, assembled element by element
    let mut a = SymmetricSparseMatrix::new(n).unwrap();
    for e in 0..n - 1 {
        a.add_sym(e, e, 1.0).unwrap();
        a.add_sym(e, e + 1, -1.0).unwrap();
        a.add_sym(e + 1, e + 1, 1.0).unwrap();
    }
    // fix the first degree of freedom
    a.zero_row_column(0).unwrap();
    a.set_sym(0, 0, 1.0).unwrap();
    println!("{}", a);

    let b: Vec<f64> = (0..n).map(|i| if i == 0 { 0.0 } else { 1.0 }).collect();
    let payload = encode_matrix_with_vector(&a, &b).unwrap();
    print!("{}", String::from_utf8_lossy(&payload));

    // what a solver would hand back
    let solution = b"%%MatrixMarket vector coordinate real general\n\
                     5\n1 0.0\n2 4.0\n3 7.0\n4 9.0\n5 1.0e+01\n";
    let x = decode_vector(solution).unwrap();
    println!("{}", x);
}
