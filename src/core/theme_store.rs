//! Observable store for the active theme.
//!
//! The store owns the theme registry, the active theme pointer, and the
//! subscriber list. Notifications fire synchronously from
//! [`ThemeStore::set_active_theme`] in subscription order and carry no
//! payload; subscribers read the new value through [`ThemeStore::get_active`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use tracing::debug;

use crate::core::config::SessionEnv;
use crate::ui::builtin_themes::load_builtin_themes;
use crate::ui::theme::Theme;

pub const DEFAULT_THEME: &str = "dark";

/// Ordered, immutable mapping from theme id to [`Theme`].
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    entries: Vec<(String, Arc<Theme>)>,
}

impl ThemeRegistry {
    /// Build a registry from `(id, theme)` pairs. Later duplicates of an id are
    /// ignored so lookups stay unambiguous.
    pub fn new(themes: impl IntoIterator<Item = (String, Theme)>) -> Self {
        let mut entries: Vec<(String, Arc<Theme>)> = Vec::new();
        for (id, theme) in themes {
            if entries.iter().any(|(existing, _)| *existing == id) {
                debug!(theme.id = %id, "duplicate theme id ignored");
                continue;
            }
            entries.push((id, Arc::new(theme)));
        }
        Self { entries }
    }

    /// The bundled themes. Always contains [`DEFAULT_THEME`].
    pub fn builtin() -> Self {
        let mut themes: Vec<(String, Theme)> = load_builtin_themes()
            .iter()
            .map(|spec| (spec.id.clone(), Theme::from_spec(spec)))
            .collect();
        if !themes.iter().any(|(id, _)| id == DEFAULT_THEME) {
            themes.insert(0, (DEFAULT_THEME.to_string(), Theme::dark_fallback()));
        }
        Self::new(themes)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Theme>> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, theme)| theme)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// `(id, theme)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Theme>)> {
        self.entries.iter().map(|(id, theme)| (id.as_str(), theme))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn first(&self) -> Option<(&str, &Arc<Theme>)> {
        self.entries.first().map(|(id, theme)| (id.as_str(), theme))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Arc<dyn Fn() + Send + Sync>;

struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

struct ActiveTheme {
    id: String,
    theme: Arc<Theme>,
}

struct StoreInner {
    registry: ThemeRegistry,
    active: RwLock<ActiveTheme>,
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
    env: SessionEnv,
}

impl StoreInner {
    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|s| s.id == id)
    }

    fn remove(&self, id: SubscriptionId) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        if subscribers.len() != before {
            debug!(theme.subscription = id.0, "theme subscriber removed");
        }
    }
}

/// Handle returned by [`ThemeStore::subscribe`].
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to end it.
pub struct Subscription {
    id: SubscriptionId,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the callback from the store. Safe to call any number of times,
    /// and after the store itself is gone.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.store.upgrade() {
            inner.remove(self.id);
        }
    }
}

/// Shared handle to the active theme. Clones refer to the same store.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("active", &self.active_id())
            .field("themes", &self.list_themes())
            .finish()
    }
}

impl ThemeStore {
    /// Create a store over `registry`. The initial theme is the one named by
    /// `env`, when registered, else [`DEFAULT_THEME`], else the first entry.
    ///
    /// An empty registry gets the palette-based dark theme so that exactly one
    /// theme is always active.
    pub fn new(registry: ThemeRegistry, env: SessionEnv) -> Self {
        let registry = if registry.is_empty() {
            ThemeRegistry::new([(DEFAULT_THEME.to_string(), Theme::dark_fallback())])
        } else {
            registry
        };

        let requested = env.theme();
        let initial = requested
            .as_deref()
            .and_then(|id| registry.get(id).map(|theme| (id, theme)))
            .or_else(|| registry.get(DEFAULT_THEME).map(|theme| (DEFAULT_THEME, theme)))
            .or_else(|| registry.first())
            .map(|(id, theme)| ActiveTheme {
                id: id.to_string(),
                theme: Arc::clone(theme),
            });

        let active = match initial {
            Some(active) => active,
            None => ActiveTheme {
                id: DEFAULT_THEME.to_string(),
                theme: Arc::new(Theme::dark_fallback()),
            },
        };

        if let Some(requested) = requested.filter(|id| *id != active.id) {
            debug!(theme.requested = %requested, theme.active = %active.id, "unknown initial theme; using default");
        }

        Self {
            inner: Arc::new(StoreInner {
                registry,
                active: RwLock::new(active),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                env,
            }),
        }
    }

    pub fn builtin(env: SessionEnv) -> Self {
        Self::new(ThemeRegistry::builtin(), env)
    }

    pub fn get_active(&self) -> Arc<Theme> {
        Arc::clone(&self.read_active().theme)
    }

    pub fn active_id(&self) -> String {
        self.read_active().id.clone()
    }

    /// Registered theme ids in registration order.
    pub fn list_themes(&self) -> Vec<String> {
        self.inner.registry.ids().map(str::to_string).collect()
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.inner.registry
    }

    /// Read-only view of the configuration record the store writes back to.
    pub fn env(&self) -> &SessionEnv {
        &self.inner.env
    }

    /// Switch to the theme registered as `id` and notify every subscriber.
    ///
    /// Unregistered ids are ignored: the active theme stays put and nobody is
    /// notified.
    pub fn set_active_theme(&self, id: &str) {
        let Some(theme) = self.inner.registry.get(id) else {
            debug!(theme.requested = %id, "ignoring unknown theme");
            return;
        };

        let previous = {
            let mut active = self
                .inner
                .active
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let previous = std::mem::replace(&mut active.id, id.to_string());
            active.theme = Arc::clone(theme);
            previous
        };
        self.inner.env.record_theme(id);
        debug!(theme.from = %previous, theme.to = %id, "theme switched");

        self.notify();
    }

    /// Register `callback` for change notifications.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscriber {
                id,
                callback: Arc::new(callback),
            });
        debug!(theme.subscription = id.0, "theme subscriber added");
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // The list is copied before any callback runs, so callbacks may subscribe
    // or unsubscribe freely. New subscribers wait for the next change; removed
    // ones are skipped even if they were in the copy.
    fn notify(&self) {
        let snapshot: Vec<(SubscriptionId, Callback)> = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|s| (s.id, Arc::clone(&s.callback)))
            .collect();

        for (id, callback) in snapshot {
            if self.inner.is_subscribed(id) {
                callback();
            }
        }
    }

    fn read_active(&self) -> std::sync::RwLockReadGuard<'_, ActiveTheme> {
        self.inner
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
