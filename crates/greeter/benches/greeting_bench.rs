use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use greeter::greeting::Name;
use greeter::service::GreetingService;
use greeter::template::Template;
use std::hint::black_box;

fn benchmark_greeting(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("greeting");

    for template in ["Hello, %s!", "%s", "Dear %s,%n%nthank you for your 100%% support."] {
        let service = GreetingService::new(Template::parse(template).expect("template should be valid"));
        let name = Name::parse("World").expect("name should be valid");
        group.bench_with_input(BenchmarkId::from_parameter(template), &name, |b, name| {
            b.iter(|| black_box(service.greeting(name)));
        });
    }

    group.finish();
}

fn benchmark_template_parse(criterion: &mut Criterion) {
    criterion.bench_function("template_parse", |b| {
        b.iter(|| Template::parse(black_box("Dear %s,%n%nthank you for your 100%% support.")));
    });
}

criterion_group!(greeting, benchmark_greeting, benchmark_template_parse);
criterion_main!(greeting);
