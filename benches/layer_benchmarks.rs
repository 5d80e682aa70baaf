use canvas_markers::prelude::*;
use canvas_markers::render::{IconImage, ImageLoadNotifier};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::rc::Rc;

struct Pin {
    at: LatLng,
    icon: IconOptions,
}

impl Marker for Pin {
    fn lat_lng(&self) -> LatLng {
        self.at
    }

    fn icon(&self) -> &IconOptions {
        &self.icon
    }

    fn fire(&self, _event: &MarkerEvent) {}
}

/// 1000x1000 px view over [-50, 50] degrees on both axes.
struct View;

impl ViewportProvider for View {
    fn container_bounds(&self) -> ScreenBounds {
        ScreenBounds::from_size(1000.0, 1000.0)
    }

    fn project(&self, at: LatLng) -> ScreenPoint {
        ScreenPoint::new((at.lng + 50.0) * 10.0, (50.0 - at.lat) * 10.0)
    }

    fn unproject(&self, p: ScreenPoint) -> LatLng {
        LatLng::new(50.0 - p.y / 10.0, p.x / 10.0 - 50.0)
    }
}

#[derive(Default)]
struct NullSurface {
    draws: usize,
}

impl DrawingSurface for NullSurface {
    fn clear(&mut self) {}

    fn begin_frame(&mut self, _clip: Option<&ScreenBounds>) {}

    fn draw_image(&mut self, _image: &IconImage, _at: ScreenPoint, _size: IconSize) {
        self.draws += 1;
    }
}

struct InstantLoader;

impl ImageLoader for InstantLoader {
    fn load(&mut self, _url: &str, notifier: ImageLoadNotifier) {
        notifier.loaded(IconImage::new(1, 1, vec![0u8; 4]));
    }
}

type BenchLayer = MarkerLayer<View, NullSurface, InstantLoader>;

fn markers(n: usize) -> Vec<MarkerRef> {
    (0..n)
        .map(|i| {
            let lat = ((i * 37) % 1800) as f64 / 10.0 - 90.0;
            let lng = ((i * 91) % 3600) as f64 / 10.0 - 180.0;
            Rc::new(Pin {
                at: LatLng::new(lat, lng),
                icon: IconOptions::new("pin.png", 12.0, 12.0),
            }) as MarkerRef
        })
        .collect()
}

fn layer() -> BenchLayer {
    LayerBuilder::new()
        .build_attached(View, NullSurface::default(), InstantLoader)
        .unwrap()
}

fn bench_insertion(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut group = c.benchmark_group("insertion");

    for n in [100, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*n as u64));

        group.bench_with_input(BenchmarkId::new("single", n), n, |b, &n| {
            b.iter_batched(
                || (layer(), markers(n)),
                |(mut layer, markers)| {
                    for marker in markers {
                        layer.add_marker(marker, None).unwrap();
                    }
                    black_box(layer.len())
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("batch", n), n, |b, &n| {
            b.iter_batched(
                || (layer(), markers(n)),
                |(mut layer, markers)| {
                    layer.add_markers(markers, None).unwrap();
                    black_box(layer.len())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("redraw");

    for n in [1_000, 10_000, 50_000].iter() {
        let mut layer = layer();
        layer.add_markers(markers(*n), None).unwrap();
        group.throughput(Throughput::Elements(layer.visible_markers().len() as u64));

        group.bench_with_input(BenchmarkId::new("dense_viewport", n), n, |b, _| {
            b.iter(|| {
                layer.redraw();
                black_box(layer.visible_markers().len())
            });
        });
    }

    group.finish();
}

fn bench_hit_testing(c: &mut Criterion) {
    let mut layer = layer();
    layer.add_markers(markers(50_000), None).unwrap();

    c.bench_function("hit_test_click", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 7.3) % 1000.0;
            black_box(layer.handle_click(&PointerEvent::click(x, 500.0)))
        });
    });

    c.bench_function("hit_test_hover", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x = (x + 3.1) % 1000.0;
            black_box(layer.handle_mouse_move(&PointerEvent::mouse_move(x, 500.0)))
        });
    });
}

criterion_group!(benches, bench_insertion, bench_redraw, bench_hit_testing);
criterion_main!(benches);
