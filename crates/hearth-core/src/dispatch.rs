//! Change notifications for store collections
//!
//! Writers call [`ChangeDispatcher::notify`] after a successful commit;
//! observers registered with [`ChangeDispatcher::subscribe`] run synchronously
//! on the writing thread. Notification always follows the commit, never
//! precedes it, so an observer re-reading the store sees the new state.

use std::sync::{Arc, Mutex};

/// The store collections observers can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Incomes,
    Liabilities,
    Assets,
    Categories,
    Budgets,
    Recurring,
}

type Observer = Box<dyn Fn(Collection) + Send + Sync>;

/// Registry of per-collection change observers
#[derive(Clone)]
pub struct ChangeDispatcher {
    observers: Arc<Mutex<Vec<(Collection, Observer)>>>,
}

impl ChangeDispatcher {
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register an observer for one collection
    pub fn subscribe<F>(&self, collection: Collection, callback: F)
    where
        F: Fn(Collection) + Send + Sync + 'static,
    {
        if let Ok(mut observers) = self.observers.lock() {
            observers.push((collection, Box::new(callback)));
        }
    }

    /// Run every observer registered for `collection`
    pub fn notify(&self, collection: Collection) {
        if let Ok(observers) = self.observers.lock() {
            for (watched, callback) in observers.iter() {
                if *watched == collection {
                    callback(collection);
                }
            }
        }
    }
}

impl Default for ChangeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
