use criterion::{black_box, Criterion, criterion_group, criterion_main};
use heat2d::parallel::LocalComm;
use heat2d::solver::stencil;
use heat2d::{HaloGrid, HeatWorker, RunOptions};

fn bench_stencil(c: &mut Criterion) {
    let n = 512;
    let mut cur: HaloGrid<f64> = HaloGrid::new(n, n);
    for (k, v) in cur.as_mut_slice().iter_mut().enumerate() {
        *v = (k as f64).sin();
    }
    let mut next = HaloGrid::new(n, n);

    c.bench_function("stencil 512x512", |ben| {
        ben.iter(|| stencil::update(black_box(&cur), black_box(&mut next), 0.2))
    });

    c.bench_function("single worker step 512x512", |ben| {
        let opts = RunOptions { nx: n, ny: n, px: 1, py: 1, steps: 0, alpha: 0.2 };
        let mut worker = HeatWorker::new(&opts, LocalComm::universe(1).remove(0)).unwrap();
        ben.iter(|| worker.step().unwrap())
    });
}

criterion_group!(benches, bench_stencil);
criterion_main!(benches);
