//! The value tree. Every JSON construct is represented by a single node type, a [Value], which
//! carries a [Kind] tag, a text payload and an ordered list of children. Object members are
//! modelled as [Kind::Key] children, each of which wraps exactly one value.
use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

use crate::grammar::{Grammar, JsonGrammar};
use crate::symbols::Text;
use crate::Kind;

/// A node within a parsed (or hand built) document.
///
/// * `String`, `Number` and `Key` nodes hold their literal text, verbatim from the input and
///   without any surrounding delimiters. Escape sequences are *not* decoded.
/// * `Null`, `True` and `False` nodes hold the keyword text that was matched.
/// * `Array` and `Object` nodes hold no text, just children.
///
/// The grammar parameter `G` is the grammar the tree was built with, and is the grammar used by
/// [Value::encode] and [Display].
pub struct Value<T = String, G = JsonGrammar> {
    kind: Kind,
    data: T,
    children: Vec<Value<T, G>>,
    grammar: PhantomData<G>,
}

impl<T: Text, G: Grammar<T::Symbol>> Value<T, G> {
    /// Create a new, childless value of a given [Kind] with an empty payload
    pub fn new(kind: Kind) -> Self {
        Self::with_data(T::default(), kind)
    }

    /// Create a new, childless value of a given [Kind] with the supplied payload
    pub fn with_data(data: T, kind: Kind) -> Self {
        Value {
            kind,
            data,
            children: vec![],
            grammar: PhantomData,
        }
    }

    pub fn null() -> Self {
        Self::with_data(T::from_ascii("null"), Kind::Null)
    }

    pub fn boolean(value: bool) -> Self {
        if value {
            Self::with_data(T::from_ascii("true"), Kind::True)
        } else {
            Self::with_data(T::from_ascii("false"), Kind::False)
        }
    }

    pub fn string(data: T) -> Self {
        Self::with_data(data, Kind::String)
    }

    /// A number is stored as its literal text, so `data` should already be well-formed
    pub fn number(data: T) -> Self {
        Self::with_data(data, Kind::Number)
    }

    /// Create an object member named `name`, wrapping `value`
    pub fn key(name: T, value: Value<T, G>) -> Self {
        let mut key = Self::with_data(name, Kind::Key);
        key.add_child(value);
        key
    }

    pub fn array<I: IntoIterator<Item = Value<T, G>>>(items: I) -> Self {
        let mut array = Self::new(Kind::Array);
        array.children = items.into_iter().collect();
        array
    }

    /// Create an object from `(name, value)` pairs, keeping their order
    pub fn object<I: IntoIterator<Item = (T, Value<T, G>)>>(members: I) -> Self {
        let mut object = Self::new(Kind::Object);
        object.children = members
            .into_iter()
            .map(|(name, value)| Value::key(name, value))
            .collect();
        object
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn children(&self) -> &[Value<T, G>] {
        &self.children
    }

    /// Anything other than [Kind::Invalid] is valid
    pub fn is_valid(&self) -> bool {
        self.kind != Kind::Invalid
    }

    /// Append a child. No checks are made against the kind of this node, so callers are
    /// responsible for only adding keys to objects, and a single value to each key.
    pub fn add_child(&mut self, child: Value<T, G>) {
        self.children.push(child)
    }

    /// Look up the first member of an object with the given name. The [Kind::Key] node itself
    /// is returned, use [Value::value] to get at what it holds. Always [None] if this isn't an
    /// object.
    pub fn find<K: ?Sized>(&self, key: &K) -> Option<&Value<T, G>>
    where
        T: PartialEq<K>,
    {
        if self.kind != Kind::Object {
            return None;
        }
        self.children
            .iter()
            .find(|child| child.kind == Kind::Key && child.data == *key)
    }

    pub fn find_mut<K: ?Sized>(&mut self, key: &K) -> Option<&mut Value<T, G>>
    where
        T: PartialEq<K>,
    {
        if self.kind != Kind::Object {
            return None;
        }
        self.children
            .iter_mut()
            .find(|child| child.kind == Kind::Key && child.data == *key)
    }

    /// Shorthand for [Value::find] followed by [Value::try_value]
    pub fn get<K: ?Sized>(&self, key: &K) -> Option<&Value<T, G>>
    where
        T: PartialEq<K>,
    {
        self.find(key).and_then(Value::try_value)
    }

    /// The value held by a [Kind::Key] node.
    ///
    /// # Panics
    /// Calling this on anything other than a key holding a value is a programming error, and
    /// panics. Use [Value::try_value] where the kind isn't known up front.
    pub fn value(&self) -> &Value<T, G> {
        match self.try_value() {
            Some(value) => value,
            None => panic!("value() called on a {:?} node", self.kind),
        }
    }

    pub fn try_value(&self) -> Option<&Value<T, G>> {
        match self.kind {
            Kind::Key => self.children.first(),
            _ => None,
        }
    }

    /// Iterate over the `(name, value)` pairs of an object, in insertion order. Empty for
    /// anything that isn't an object.
    pub fn members(&self) -> impl Iterator<Item = (&T, &Value<T, G>)> + '_ {
        let is_object = self.kind == Kind::Object;
        self.children
            .iter()
            .filter(move |child| is_object && child.kind == Kind::Key)
            .filter_map(|key| key.try_value().map(|value| (&key.data, value)))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            Kind::True => Some(true),
            Kind::False => Some(false),
            _ => None,
        }
    }

    /// Convert a number into a float, using fast_float
    pub fn as_f64(&self) -> Option<f64> {
        if self.kind != Kind::Number {
            return None;
        }
        let text = self.data.to_utf8();
        fast_float::parse(text.as_bytes()).ok()
    }

    /// Convert a number into an integer. [None] if the number has a fractional part or an
    /// exponent, or doesn't fit.
    #[cfg(feature = "mixed_numerics")]
    pub fn as_i64(&self) -> Option<i64> {
        if self.kind != Kind::Number {
            return None;
        }
        let text = self.data.to_utf8();
        lexical::parse::<i64, _>(text.as_bytes()).ok()
    }

    /// Render the tree back to text using the grammar it was built with
    pub fn encode(&self) -> T {
        self.encode_with::<G>()
    }

    /// Render the tree back to text using an arbitrary grammar
    pub fn encode_with<R: Grammar<T::Symbol>>(&self) -> T {
        let mut out = T::default();
        self.encode_into::<R>(&mut out);
        out
    }

    fn encode_into<R: Grammar<T::Symbol>>(&self, out: &mut T) {
        match self.kind {
            Kind::Array => {
                out.push_symbol(R::array_begin());
                self.encode_children::<R>(out);
                out.push_symbol(R::array_end());
            }
            Kind::Object => {
                out.push_symbol(R::object_begin());
                self.encode_children::<R>(out);
                out.push_symbol(R::object_end());
            }
            Kind::Key => {
                out.push_symbol(R::string_begin());
                out.push_text(&self.data);
                out.push_symbol(R::string_end());
                out.push_symbol(R::colon());
                if let Some(value) = self.try_value() {
                    value.encode_into::<R>(out);
                }
            }
            Kind::String => {
                out.push_symbol(R::string_begin());
                out.push_text(&self.data);
                out.push_symbol(R::string_end());
            }
            Kind::Null | Kind::True | Kind::False | Kind::Number => out.push_text(&self.data),
            Kind::Invalid => (),
        }
    }

    fn encode_children<R: Grammar<T::Symbol>>(&self, out: &mut T) {
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                out.push_symbol(R::comma());
            }
            child.encode_into::<R>(out);
        }
    }
}

impl<G: Grammar<char>> Display for Value<String, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<T: Default, G> Default for Value<T, G> {
    /// The default value is [Kind::Invalid]
    fn default() -> Self {
        Value {
            kind: Kind::Invalid,
            data: T::default(),
            children: vec![],
            grammar: PhantomData,
        }
    }
}

impl<T: Clone, G> Clone for Value<T, G> {
    fn clone(&self) -> Self {
        Value {
            kind: self.kind,
            data: self.data.clone(),
            children: self.children.clone(),
            grammar: PhantomData,
        }
    }
}

impl<T: PartialEq, G> PartialEq for Value<T, G> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.data == other.data && self.children == other.children
    }
}

impl<T: Eq, G> Eq for Value<T, G> {}

impl<T: Debug, G> Debug for Value<T, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value")
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("children", &self.children)
            .finish()
    }
}
