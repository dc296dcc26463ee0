use crate::tensor::Tensor;
use ndarray::{ArrayViewD, Axis};
use std::fmt;

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn write_nested(f: &mut fmt::Formatter, view: ArrayViewD<'_, f32>) -> fmt::Result {
            if view.ndim() == 0 {
                return write!(f, "{:8.4}", view.iter().next().copied().unwrap_or(f32::NAN));
            }
            write!(f, "[")?;
            let len = view.len_of(Axis(0));
            for (i, sub) in view.axis_iter(Axis(0)).enumerate() {
                write_nested(f, sub)?;
                if i + 1 != len {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")
        }

        write_nested(f, self.view())?;
        write!(f, "\n形状: {:?}", self.shape())
    }
}
