use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use seqwalk_core::{
    encode_run, AppliedEdit, AxisRange, CosmeticEdit, InputSource, MemorySource, PathBuffers, PathEncoder,
    PlotStyle, RenderBridge, Rgb, RuleTable, RunConfig, WalkState,
};

fn generate_fasta(length: usize, line_width: usize) -> String {
    let pattern = b"ATCGATCGGCTANNAT";
    let mut fasta = String::from(">bench sequence\n");
    let mut written = 0;

    while written < length {
        let line_len = line_width.min(length - written);
        for i in 0..line_len {
            fasta.push(pattern[(written + i) % pattern.len()] as char);
        }
        fasta.push('\n');
        written += line_len;
    }

    fasta
}

/// Renderer that drops everything.
struct NullBridge;

impl RenderBridge for NullBridge {
    fn init_plot(&mut self, _style: &PlotStyle) {}
    fn update_plot(&mut self, x: &[i64], _y: &[i64], _revision: u64) {
        black_box(x.len());
    }
    fn set_colors(&mut self, colors: &[Rgb]) {
        black_box(colors.len());
    }
    fn apply_cosmetic_edit(&mut self, _edit: &CosmeticEdit) -> AppliedEdit {
        self.layout()
    }
    fn layout(&self) -> AppliedEdit {
        AppliedEdit {
            marker_size: 1,
            x_range: AxisRange::new(0.0, 1.0),
            y_range: AxisRange::new(0.0, 1.0),
        }
    }
}

fn bench_walk_line(c: &mut Criterion) {
    let rules = RuleTable::default();
    let line = "ACGT".repeat(25_000);

    let mut group = c.benchmark_group("walk_line");
    group.throughput(Throughput::Bytes(line.len() as u64));
    for offset in [1u64, 10, 1000] {
        group.bench_with_input(BenchmarkId::new("offset", offset), &offset, |b, &offset| {
            let encoder = PathEncoder::new(&rules, offset);
            b.iter(|| {
                let mut buffers = PathBuffers::new(true);
                let state = encoder.walk_line(WalkState::default(), black_box(&line), &mut buffers);
                black_box((state, buffers))
            })
        });
    }
    group.finish();
}

fn bench_chunked_run(c: &mut Criterion) {
    let fasta = generate_fasta(1_000_000, 60);

    let mut group = c.benchmark_group("encode_run_1mb");
    group.throughput(Throughput::Bytes(fasta.len() as u64));
    for chunk_size in [4_096u64, 65_536, 1_000_000] {
        let config = RunConfig {
            rules: RuleTable::default(),
            style: PlotStyle::default(),
            point_offset: 10,
            color_enabled: true,
            chunk_size_bytes: chunk_size,
            input: InputSource::new("bench.fa", "bench.fa", fasta.len() as u64),
        };
        group.bench_with_input(BenchmarkId::new("chunk", chunk_size), &config, |b, config| {
            b.iter(|| {
                let source = MemorySource::new("bench.fa", fasta.as_bytes());
                let summary = encode_run(config, source, &mut NullBridge, |_| {}).unwrap();
                black_box(summary.points())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_walk_line, bench_chunked_run);
criterion_main!(benches);
