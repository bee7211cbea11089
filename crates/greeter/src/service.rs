use crate::greeting::{Greeting, Name};
use crate::template::Template;
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Issues greetings with strictly increasing ids and remembers the last one.
///
/// All state is lock-free: the id comes from an atomic counter and the last
/// greeting is published through an [`ArcSwapOption`], so readers always see
/// a whole greeting.
pub struct GreetingService {
    template: Template,
    counter: AtomicU64,
    last_greeting: ArcSwapOption<Greeting>,
}

impl GreetingService {
    pub fn new(template: Template) -> Self {
        Self { template, counter: AtomicU64::new(0), last_greeting: ArcSwapOption::empty() }
    }

    pub fn greeting(&self, name: &Name) -> Greeting {
        let id = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let greeting = Greeting::new(id, self.template.render(name.as_str()));
        trace!(id, content = %greeting.content, "greeting issued");

        self.last_greeting.store(Some(Arc::new(greeting.clone())));
        greeting
    }

    /// `None` until the first greeting is issued.
    pub fn last_greeting(&self) -> Option<Arc<Greeting>> {
        self.last_greeting.load_full()
    }

    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

impl Default for GreetingService {
    fn default() -> Self {
        Self::new(Template::default())
    }
}

impl fmt::Debug for GreetingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreetingService")
            .field("template", &self.template.as_str())
            .field("issued", &self.issued())
            .field("last_greeting", &self.last_greeting())
            .finish()
    }
}
