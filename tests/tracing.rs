#![cfg(feature = "tracing")]

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use pretty_assertions::assert_eq;
use switcheroo::{Sum, match_on};
use tracing::{
    Event, Subscriber,
    field::{Field, Visit},
};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};

type Recorded = Arc<Mutex<Vec<Vec<(String, String)>>>>;

/// Keeps the fields of every event, as `name = value` pairs.
struct Recorder(Recorded);

#[derive(Default)]
struct Fields(Vec<(String, String)>);

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push(fields.0);
    }
}

fn field<'a>(event: &'a [(String, String)], name: &str) -> Option<&'a str> {
    event
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, value)| value.as_str())
}

struct Red;
struct Green;
struct Blue;

#[test]
fn fallback_and_dispatch_are_traced() {
    let recorded = Recorded::default();
    let subscriber = registry().with(Recorder(recorded.clone()));

    let code = tracing::subscriber::with_default(subscriber, || {
        let color: Sum![Red, Green, Blue] = Sum::new(Blue);
        match_on(color)
            .when::<Red, _, _>(|| 0)
            .otherwise(|| -1)
            .run()
    });
    assert_eq!(code, -1);

    let events = recorded.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(field(&events[0], "missing"), Some("2"));
    assert_eq!(field(&events[1], "position"), Some("2"));
}
