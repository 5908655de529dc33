// Hand-written x86-64 assembly SAXPY.

use crate::{SaxpyKernel, assert_slice_lengths, saxpy_into};

#[cfg(target_arch = "x86_64")]
use std::arch::asm;

/// Inline-assembly kernel: a packed SSE loop over blocks of four elements,
/// with the tail finished by the scalar loop.
///
/// On targets other than x86-64 this is the scalar loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Asm;

impl SaxpyKernel for Asm {
    fn name(&self) -> &'static str {
        "asm"
    }

    fn is_native(&self) -> bool {
        cfg!(target_arch = "x86_64")
    }

    fn apply(&self, a: f32, x: &[f32], y: &[f32], z: &mut [f32]) {
        assert_slice_lengths(x, y, z);

        #[cfg(target_arch = "x86_64")]
        let done = saxpy_packed(a, x, y, z);
        #[cfg(not(target_arch = "x86_64"))]
        let done = 0;

        saxpy_into(a, &x[done..], &y[done..], &mut z[done..]);
    }
}

/// Computes the first `len & !3` elements and returns that count.
///
/// __Register use:__
///
/// + `va` - `a` broadcast to all four lanes
///
/// + `i` - element index, stepped by 4 up to `n`
///
#[cfg(target_arch = "x86_64")]
fn saxpy_packed(a: f32, x: &[f32], y: &[f32], z: &mut [f32]) -> usize {
    let n = z.len() & !3;
    if n == 0 {
        return 0;
    }

    // SAFETY: callers check that x, y and z have equal lengths, and the loop
    // only touches indices below n <= z.len(). movups has no alignment
    // requirement and SSE is part of the x86-64 baseline.
    unsafe {
        asm!(
            "shufps {va}, {va}, 0",
            "2:",
            "movups {vx}, xmmword ptr [{x} + 4*{i}]",
            "mulps {vx}, {va}",
            "movups {vy}, xmmword ptr [{y} + 4*{i}]",
            "addps {vx}, {vy}",
            "movups xmmword ptr [{z} + 4*{i}], {vx}",
            "add {i}, 4",
            "cmp {i}, {n}",
            "jb 2b",
            va = inout(xmm_reg) a => _,
            vx = out(xmm_reg) _,
            vy = out(xmm_reg) _,
            x = in(reg) x.as_ptr(),
            y = in(reg) y.as_ptr(),
            z = in(reg) z.as_mut_ptr(),
            i = inout(reg) 0_usize => _,
            n = in(reg) n,
            options(nostack),
        );
    }

    n
}
