use ndarray::ArrayView2;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Column index of the largest value in each row; ties keep the first.
    pub fn argmax_rows(matrix: ArrayView2<f64>) -> Vec<usize> {
        matrix
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (idx, &value)| {
                        if value > best.1 {
                            (idx, value)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect()
    }
}
