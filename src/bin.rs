use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use structopt::StructOpt;

use heap_pq::HeapPQ;

const ABOUT: &str = "
Runs a small discrete-event simulation on top of HeapPQ.
Random events are scheduled out of order and replayed by timestamp.
Set RUST_LOG=debug to see every event.
";

#[derive(StructOpt)]
#[structopt(name = "heap-pq-demo", about = ABOUT)]
struct Options {
    #[structopt(long, help = "number of events to schedule", default_value = "20")]
    events: usize,

    #[structopt(long, help = "seed for a reproducible run")]
    seed: Option<u64>,

    #[structopt(long, help = "replay the latest event first")]
    latest_first: bool,
}

#[derive(Debug)]
struct Event {
    time: u32,
    id: usize,
}

fn schedule_events<R: Rng>(rng: &mut R, n_events: usize, latest_first: bool) -> HeapPQ<Event> {
    let mut queue = if latest_first {
        HeapPQ::with_capacity_ordering_by(|a: &Event, b: &Event| a.time < b.time, n_events)
    } else {
        HeapPQ::with_capacity_ordering_by(|a: &Event, b: &Event| a.time > b.time, n_events)
    };
    for id in 0..n_events {
        let event = Event {
            time: rng.gen_range(0, 1000),
            id,
        };
        log::debug!("scheduled {:?}", event);
        queue.push(event);
    }
    queue
}

fn replay_events(queue: &mut HeapPQ<Event>, latest_first: bool) -> bool {
    let mut in_order = true;
    let mut last: Option<u32> = None;
    while let Some(event) = queue.pop() {
        log::debug!("replaying event {} at t={}", event.id, event.time);
        if let Some(prev) = last {
            let ok = if latest_first {
                prev >= event.time
            } else {
                prev <= event.time
            };
            in_order &= ok;
        }
        last = Some(event.time);
    }
    in_order
}

pub fn main() {
    env_logger::init();
    let options = Options::from_args();
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut queue = schedule_events(&mut rng, options.events, options.latest_first);
    log::info!("scheduled {} events", queue.len());
    if let Some(first) = queue.peek() {
        log::info!("first event due: {:?}", first);
    }
    let in_order = replay_events(&mut queue, options.latest_first);
    println!(
        "replayed {} events {}",
        options.events,
        if in_order { "in order" } else { "OUT OF ORDER" }
    );
}
