use hashbrown::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

/// Represents a TripleS heap-allocated string.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct StrObj {
    pub chars: String,
}

impl fmt::Display for StrObj {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.chars)
    }
}

/// All types of heap objects in TripleS. Values reach heap storage
/// through the handle held by each variant; the allocations themselves
/// are owned by the `Heap`.
#[derive(Clone)]
pub enum Object {
    Str(Rc<StrObj>),
}

impl Object {
    /// Checks that two objects are the same object. Because all strings
    /// are interned, identity equality is also content equality.
    pub fn equals(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Str(a), Object::Str(b)) => Rc::ptr_eq(a, b),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Object::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Owns every heap object created during compilation and execution.
/// Objects stay alive at least until the heap (and with it, the
/// virtual machine) is dropped.
pub struct Heap {
    /// Maps raw string content to its canonical object, so that two
    /// strings with equal content always share one allocation.
    strings: HashMap<String, Rc<StrObj>>,
}

impl Heap {
    /// Creates a new, empty heap.
    pub fn new() -> Self {
        Self {
            strings: HashMap::new(),
        }
    }

    /// Interns a string, returning the canonical handle for its content.
    ///
    /// ## Arguments
    /// * `chars` – The raw content of the string.
    ///
    /// ## Returns
    /// `Rc<StrObj>` – The shared handle. Allocates only the first time
    /// a given content is seen.
    pub fn intern(&mut self, chars: String) -> Rc<StrObj> {
        if let Some(interned) = self.strings.get(&chars) {
            return Rc::clone(interned);
        }

        let obj = Rc::new(StrObj {
            chars: chars.clone(),
        });
        self.strings.insert(chars, Rc::clone(&obj));
        obj
    }

    /// Gets the number of distinct interned strings.
    #[cfg(test)]
    pub fn strings_count(&self) -> usize {
        self.strings.len()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Heap::new()
    }
}
