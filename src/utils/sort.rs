/// Sort a SoA pair (`inds`, `vals`) by ascending `inds`, stable.
/// `vals` is reordered together with its index.
///
/// Small inputs use insertion sort, larger ones a 4 pass LSD radix sort
/// over the u32 key bytes (each pass O(n + 256)).
pub fn sort_soa_by_index<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }
    if n <= 32 {
        insertion_sort_soa(inds, vals);
        return;
    }

    let mut src_inds = inds.to_vec();
    let mut src_vals = vals.to_vec();
    let mut dst_inds = vec![0u32; n];
    let mut dst_vals = src_vals.clone();

    for shift in [0u32, 8, 16, 24] {
        let mut count = [0usize; 256];
        for &k in &src_inds {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }
        // prefix sum -> start position of each bucket
        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }
        for (k, v) in src_inds.iter().zip(src_vals.iter()) {
            let bucket = ((k >> shift) & 0xFF) as usize;
            let pos = count[bucket];
            count[bucket] = pos + 1;
            dst_inds[pos] = *k;
            dst_vals[pos] = *v;
        }
        std::mem::swap(&mut src_inds, &mut dst_inds);
        std::mem::swap(&mut src_vals, &mut dst_vals);
    }

    // even pass count: result is in src_*
    inds.copy_from_slice(&src_inds);
    vals.copy_from_slice(&src_vals);
}

#[inline]
fn insertion_sort_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}
