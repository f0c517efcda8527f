//! Mock host used by the integration tests.
//!
//! Two handle implementations back the two host flavors: [`MockValue`]
//! models a native (memory-based) host with scripted fields, casts, and
//! pointer chains, and [`MockObject`] models a managed-runtime host that
//! answers method invocations.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Once;

use lens_core::{Address, InvokeArg, LensError, LensResult, TypeDescriptor, TypeKind, ValueHandle};
use lens_utils::LogLevel;

/// Route the engine's degradation/dispatch logs to a file, the way a real
/// host embedding would.
pub fn init_test_logging()
{
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let dir = std::env::temp_dir().join("lens-core-tests");
        if let Ok(guard) = lens_utils::init_host_logging(Some(LogLevel::Trace), Some(&dir)) {
            // The writer must outlive every test in this binary.
            std::mem::forget(guard);
        }
    });
}

/// Scriptable type descriptor.
#[derive(Clone)]
pub struct MockType
{
    name: Option<String>,
    kind: TypeKind,
    is_reference: bool,
    byte_size: Option<u64>,
    array_length: Option<u64>,
    target: Option<Rc<MockType>>,
    canonical: Option<Rc<MockType>>,
}

impl MockType
{
    pub fn new(name: &str, kind: TypeKind) -> Self
    {
        Self {
            name: Some(name.to_string()),
            kind,
            is_reference: false,
            byte_size: None,
            array_length: None,
            target: None,
            canonical: None,
        }
    }

    pub fn anonymous(kind: TypeKind) -> Self
    {
        Self {
            name: None,
            kind,
            is_reference: false,
            byte_size: None,
            array_length: None,
            target: None,
            canonical: None,
        }
    }

    /// A reference type whose canonical form is `target`.
    pub fn reference_to(target: MockType) -> Self
    {
        Self {
            name: target.name.as_ref().map(|name| format!("{name}&")),
            kind: TypeKind::Other,
            is_reference: true,
            byte_size: None,
            array_length: None,
            target: Some(Rc::new(target)),
            canonical: None,
        }
    }

    pub fn with_byte_size(mut self, byte_size: u64) -> Self
    {
        self.byte_size = Some(byte_size);
        self
    }

    pub fn with_array_length(mut self, length: u64) -> Self
    {
        self.array_length = Some(length);
        self
    }

    pub fn with_target(mut self, target: MockType) -> Self
    {
        self.target = Some(Rc::new(target));
        self
    }

    /// Typedef alias: stripping resolves to `canonical`.
    pub fn with_canonical(mut self, canonical: MockType) -> Self
    {
        self.canonical = Some(Rc::new(canonical));
        self
    }
}

impl TypeDescriptor for MockType
{
    fn clone_box(&self) -> Box<dyn TypeDescriptor>
    {
        Box::new(self.clone())
    }

    fn name(&self) -> Option<String>
    {
        self.name.clone()
    }

    fn kind(&self) -> TypeKind
    {
        self.kind
    }

    fn is_reference(&self) -> bool
    {
        self.is_reference
    }

    fn target_type(&self) -> Option<Box<dyn TypeDescriptor>>
    {
        self.target.as_ref().map(|target| (**target).clone_box())
    }

    fn field_type(&self, _name: &str) -> Option<Box<dyn TypeDescriptor>>
    {
        None
    }

    fn byte_size(&self) -> Option<u64>
    {
        self.byte_size
    }

    fn array_length(&self) -> Option<u64>
    {
        self.array_length
    }

    fn strip_typedefs_and_qualifiers(&self) -> Box<dyn TypeDescriptor>
    {
        match &self.canonical {
            Some(canonical) => (**canonical).clone_box(),
            None => self.clone_box(),
        }
    }
}

/// Scriptable native-host value handle.
///
/// Everything the handle can answer is declared up front with the builder
/// methods; any operation without scripted data returns the error a real
/// host would.
#[derive(Clone)]
pub struct MockValue
{
    ty: MockType,
    int: Option<i64>,
    address: Option<u64>,
    bytes: Option<Vec<u8>>,
    display: Option<String>,
    fields: Vec<(String, Rc<MockValue>)>,
    elements: Vec<Rc<MockValue>>,
    deref_to: Option<Rc<MockValue>>,
    next: Option<Rc<MockValue>>,
    casts: Vec<(String, Rc<MockValue>)>,
    types: Vec<(String, MockType)>,
}

impl MockValue
{
    pub fn typed(ty: MockType) -> Self
    {
        Self {
            ty,
            int: None,
            address: None,
            bytes: None,
            display: None,
            fields: Vec::new(),
            elements: Vec::new(),
            deref_to: None,
            next: None,
            casts: Vec::new(),
            types: Vec::new(),
        }
    }

    /// An `int`-typed scalar whose display is its decimal rendering.
    pub fn int(value: i64) -> Self
    {
        Self::typed(MockType::new("int", TypeKind::Int))
            .with_int(value)
            .with_display(&value.to_string())
    }

    pub fn with_int(mut self, value: i64) -> Self
    {
        self.int = Some(value);
        self
    }

    pub fn with_address(mut self, address: u64) -> Self
    {
        self.address = Some(address);
        self
    }

    pub fn with_bytes(mut self, bytes: &[u8]) -> Self
    {
        self.bytes = Some(bytes.to_vec());
        self
    }

    pub fn with_display(mut self, display: &str) -> Self
    {
        self.display = Some(display.to_string());
        self
    }

    pub fn with_field(mut self, name: &str, value: MockValue) -> Self
    {
        self.fields.push((name.to_string(), Rc::new(value)));
        self
    }

    pub fn with_element(mut self, element: MockValue) -> Self
    {
        self.elements.push(Rc::new(element));
        self
    }

    pub fn with_deref(mut self, target: MockValue) -> Self
    {
        self.deref_to = Some(Rc::new(target));
        self
    }

    /// Result of advancing this handle by one element (`pointer_add(1)`).
    pub fn with_next(mut self, next: MockValue) -> Self
    {
        self.next = Some(Rc::new(next));
        self
    }

    /// Result of casting this handle to the type with the given name.
    pub fn with_cast(mut self, type_name: &str, result: MockValue) -> Self
    {
        self.casts.push((type_name.to_string(), Rc::new(result)));
        self
    }

    /// Make a type resolvable through `lookup_type` on this handle.
    pub fn with_known_type(mut self, name: &str, ty: MockType) -> Self
    {
        self.types.push((name.to_string(), ty));
        self
    }
}

impl ValueHandle for MockValue
{
    fn clone_box(&self) -> Box<dyn ValueHandle>
    {
        Box::new(self.clone())
    }

    fn value_type(&self) -> Box<dyn TypeDescriptor>
    {
        Box::new(self.ty.clone())
    }

    fn field(&self, name: &str) -> LensResult<Box<dyn ValueHandle>>
    {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| (**value).clone_box())
            .ok_or_else(|| LensError::MissingField(name.to_string()))
    }

    fn index(&self, index: u64) -> LensResult<Box<dyn ValueHandle>>
    {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.elements.get(index))
            .map(|element| (**element).clone_box())
            .ok_or(LensError::IndexOutOfBounds(index))
    }

    fn deref(&self) -> LensResult<Box<dyn ValueHandle>>
    {
        self.deref_to
            .as_ref()
            .map(|target| (**target).clone_box())
            .ok_or(LensError::NotAPointer)
    }

    fn cast(&self, ty: &dyn TypeDescriptor) -> LensResult<Box<dyn ValueHandle>>
    {
        let name = ty.name().unwrap_or_default();
        self.casts
            .iter()
            .find(|(target, _)| *target == name)
            .map(|(_, result)| (**result).clone_box())
            .ok_or(LensError::BadCast(name))
    }

    fn is_null(&self) -> LensResult<bool>
    {
        if let Some(address) = self.address {
            Ok(address == 0)
        } else if let Some(int) = self.int {
            Ok(int == 0)
        } else {
            Ok(false)
        }
    }

    fn as_address(&self) -> LensResult<Address>
    {
        self.address.map(Address::new).ok_or(LensError::NotAPointer)
    }

    fn as_i64(&self) -> LensResult<i64>
    {
        self.int.ok_or(LensError::Unsupported("as_i64"))
    }

    fn read_bytes(&self, max_len: usize) -> LensResult<Vec<u8>>
    {
        let bytes = self.bytes.as_ref().ok_or(LensError::Unsupported("read_bytes"))?;
        Ok(bytes.iter().copied().take(max_len).collect())
    }

    fn display_string(&self) -> LensResult<String>
    {
        self.display.clone().ok_or(LensError::Unsupported("display_string"))
    }

    fn pointer_add(&self, count: i64) -> LensResult<Box<dyn ValueHandle>>
    {
        let mut current = self.clone();
        for _ in 0..count {
            current = match &current.next {
                Some(next) => (**next).clone(),
                None => return Err(LensError::NotAPointer),
            };
        }
        Ok(Box::new(current))
    }

    fn lookup_type(&self, name: &str) -> LensResult<Box<dyn TypeDescriptor>>
    {
        self.types
            .iter()
            .find(|(known, _)| known == name)
            .map(|(_, ty)| ty.clone_box())
            .ok_or_else(|| LensError::UnknownType(name.to_string()))
    }
}

/// Scriptable managed-runtime value handle.
///
/// Models remote object references that answer method invocations the way
/// a VM-attached host would. Iterator handles share their position through
/// `Rc`, matching the remote-reference semantics of `clone_box`.
#[derive(Clone)]
pub enum MockObject
{
    /// A boxed integer; answers `as_i64`.
    Int(i64),
    /// A string-rendering object; answers `toString`/`getPath`/`getMessage`.
    Str
    {
        type_name: String, text: String
    },
    /// Random-access container; answers `size`, `get`, and `iterator`.
    List
    {
        type_name: String, elements: Vec<MockObject>
    },
    /// Iterator-only container; answers `size` and `iterator`.
    Collection
    {
        type_name: String, elements: Vec<MockObject>
    },
    /// Map; answers `size` and `entrySet`.
    Map
    {
        type_name: String,
        entry_type: String,
        entries: Vec<(MockObject, MockObject)>,
    },
    /// Map entry of the learned concrete type; answers `getKey`/`getValue`.
    Entry
    {
        entry_type: String,
        key: Box<MockObject>,
        value: Box<MockObject>,
    },
    /// Live iterator; answers `next` until exhausted.
    Iter(Rc<RefCell<VecDeque<MockObject>>>),
}

impl MockObject
{
    pub fn string(type_name: &str, text: &str) -> Self
    {
        MockObject::Str {
            type_name: type_name.to_string(),
            text: text.to_string(),
        }
    }

    pub fn list(type_name: &str, elements: Vec<MockObject>) -> Self
    {
        MockObject::List {
            type_name: type_name.to_string(),
            elements,
        }
    }

    pub fn collection(type_name: &str, elements: Vec<MockObject>) -> Self
    {
        MockObject::Collection {
            type_name: type_name.to_string(),
            elements,
        }
    }

    pub fn map(type_name: &str, entry_type: &str, entries: Vec<(MockObject, MockObject)>) -> Self
    {
        MockObject::Map {
            type_name: type_name.to_string(),
            entry_type: entry_type.to_string(),
            entries,
        }
    }

    pub fn entry(entry_type: &str, key: MockObject, value: MockObject) -> Self
    {
        MockObject::Entry {
            entry_type: entry_type.to_string(),
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    fn type_name(&self) -> String
    {
        match self {
            MockObject::Int(_) => "int".to_string(),
            MockObject::Str { type_name, .. }
            | MockObject::List { type_name, .. }
            | MockObject::Collection { type_name, .. }
            | MockObject::Map { type_name, .. } => type_name.clone(),
            MockObject::Entry { entry_type, .. } => entry_type.clone(),
            MockObject::Iter(_) => "java.util.Iterator".to_string(),
        }
    }

    fn fresh_iterator(elements: &[MockObject]) -> Box<dyn ValueHandle>
    {
        Box::new(MockObject::Iter(Rc::new(RefCell::new(
            elements.iter().cloned().collect(),
        ))))
    }

    fn invoke_failed(method: &str, details: &str) -> LensError
    {
        LensError::InvokeFailed {
            method: method.to_string(),
            details: details.to_string(),
        }
    }
}

impl ValueHandle for MockObject
{
    fn clone_box(&self) -> Box<dyn ValueHandle>
    {
        Box::new(self.clone())
    }

    fn value_type(&self) -> Box<dyn TypeDescriptor>
    {
        let kind = match self {
            MockObject::Int(_) => TypeKind::Int,
            _ => TypeKind::Struct,
        };
        Box::new(MockType::new(&self.type_name(), kind))
    }

    fn field(&self, name: &str) -> LensResult<Box<dyn ValueHandle>>
    {
        Err(LensError::MissingField(name.to_string()))
    }

    fn index(&self, index: u64) -> LensResult<Box<dyn ValueHandle>>
    {
        Err(LensError::IndexOutOfBounds(index))
    }

    fn deref(&self) -> LensResult<Box<dyn ValueHandle>>
    {
        Err(LensError::NotAPointer)
    }

    fn cast(&self, ty: &dyn TypeDescriptor) -> LensResult<Box<dyn ValueHandle>>
    {
        Err(LensError::BadCast(ty.name().unwrap_or_default()))
    }

    fn is_null(&self) -> LensResult<bool>
    {
        Ok(false)
    }

    fn as_address(&self) -> LensResult<Address>
    {
        Err(LensError::NotAPointer)
    }

    fn as_i64(&self) -> LensResult<i64>
    {
        match self {
            MockObject::Int(value) => Ok(*value),
            _ => Err(LensError::Unsupported("as_i64")),
        }
    }

    fn read_bytes(&self, _max_len: usize) -> LensResult<Vec<u8>>
    {
        Err(LensError::Unsupported("read_bytes"))
    }

    fn display_string(&self) -> LensResult<String>
    {
        match self {
            MockObject::Int(value) => Ok(value.to_string()),
            MockObject::Str { text, .. } => Ok(format!("\"{text}\"")),
            MockObject::List { type_name, elements } | MockObject::Collection { type_name, elements } => {
                Ok(format!("{type_name} (size {})", elements.len()))
            }
            MockObject::Map { type_name, entries, .. } => Ok(format!("{type_name} (size {})", entries.len())),
            MockObject::Entry { .. } | MockObject::Iter(_) => Err(LensError::Unsupported("display_string")),
        }
    }

    fn pointer_add(&self, _count: i64) -> LensResult<Box<dyn ValueHandle>>
    {
        Err(LensError::NotAPointer)
    }

    fn lookup_type(&self, name: &str) -> LensResult<Box<dyn TypeDescriptor>>
    {
        Err(LensError::UnknownType(name.to_string()))
    }

    fn invoke(&self, method: &str, args: &[InvokeArg<'_>]) -> LensResult<Box<dyn ValueHandle>>
    {
        match (self, method) {
            (MockObject::Str { text, .. }, "toString" | "getPath" | "getMessage") => {
                Ok(Box::new(MockObject::string("java.lang.String", text)))
            }
            (
                MockObject::List { elements, .. } | MockObject::Collection { elements, .. },
                "size",
            ) => Ok(Box::new(MockObject::Int(elements.len() as i64))),
            (MockObject::Map { entries, .. }, "size") => Ok(Box::new(MockObject::Int(entries.len() as i64))),
            (MockObject::List { elements, .. }, "get") => match args {
                [InvokeArg::Int(index)] => usize::try_from(*index)
                    .ok()
                    .and_then(|index| elements.get(index))
                    .map(|element| element.clone_box())
                    .ok_or_else(|| Self::invoke_failed(method, "index out of bounds")),
                _ => Err(Self::invoke_failed(method, "expected one integer argument")),
            },
            (
                MockObject::List { elements, .. } | MockObject::Collection { elements, .. },
                "iterator",
            ) => Ok(Self::fresh_iterator(elements)),
            (MockObject::Map { entry_type, entries, .. }, "entrySet") => {
                let entries: Vec<MockObject> = entries
                    .iter()
                    .map(|(key, value)| MockObject::entry(entry_type, key.clone(), value.clone()))
                    .collect();
                Ok(Box::new(MockObject::collection("java.util.Set", entries)))
            }
            (MockObject::Entry { key, .. }, "getKey") => Ok((**key).clone_box()),
            (MockObject::Entry { value, .. }, "getValue") => Ok((**value).clone_box()),
            (MockObject::Iter(items), "next") => items
                .borrow_mut()
                .pop_front()
                .map(|item| Box::new(item) as Box<dyn ValueHandle>)
                .ok_or_else(|| Self::invoke_failed(method, "iterator exhausted")),
            _ => Err(Self::invoke_failed(method, "method not scripted for this object")),
        }
    }
}
