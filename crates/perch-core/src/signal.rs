use std::cell::RefCell;
use std::rc::Rc;

pub type SubId = usize;

/// Cloneable handle to a piece of observable state. The help affordance's
/// visibility flag at a composition root is typically a `Signal<bool>`.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    subs: Vec<Rc<dyn Fn(&T)>>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    // Mutable borrow is released before subscribers run, so a subscriber may
    // read the signal it is observing.
    fn notify(&self) {
        let subs: Vec<Rc<dyn Fn(&T)>> = self.0.borrow().subs.clone();
        for s in subs {
            s(&self.0.borrow().value);
        }
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0.borrow_mut().subs.push(Rc::new(f));
        self.0.borrow().subs.len() - 1
    }
}

impl Signal<bool> {
    pub fn toggle(&self) {
        self.update(|v| *v = !*v);
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
