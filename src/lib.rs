//! Compile-time enum reflection: bidirectional value/name lookup tables with
//! validity and range queries, built once per process and cached for its
//! lifetime.
//!
//! Registering an enum — with [`derive@ReflectedEnum`] or [`register_enum!`] —
//! captures its exhaustive member list at compile time. The first query
//! materializes a lookup table: a direct-indexed dense table when the raw
//! values are exactly `0..N` in declaration order, a sorted binary-search
//! table otherwise.
//!
//! ```
//! use enum_tables::ReflectedEnum;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Debug, ReflectedEnum)]
//! #[repr(u8)]
//! enum Direction {
//!     North,
//!     East,
//!     South,
//!     West,
//! }
//!
//! assert!(enum_tables::is_ordinal::<Direction>());
//! assert_eq!(enum_tables::number_of_elements::<Direction>(), 4);
//! assert_eq!(enum_tables::to_string(Direction::East), "East");
//! assert_eq!(enum_tables::to_enum::<Direction, _>("West"), Some(Direction::West));
//! assert_eq!(enum_tables::to_enum::<Direction, _>(2), Some(Direction::South));
//! assert_eq!(enum_tables::to_enum::<Direction, _>(9), None);
//! ```
//!
//! Names can be re-projected into any string type implementing
//! [`EnumString`]; the converted table is cached per (enum, string type) pair.

pub use ::enum_tables_proc_macros::ReflectedEnum;

pub use crate::table::{AllStrings, AllValues};

use {
	num_traits::{NumCast, PrimInt, ToPrimitive},
	std::{borrow::Cow, fmt},
};

mod registry;
mod table;

/// A registered enumeration: a closed set of named constants sharing an
/// integer representation, together with its exhaustive association list.
///
/// Implemented by [`derive@ReflectedEnum`] or [`register_enum!`], never by
/// hand. The trait is `unsafe` because the query engine relies on
/// `ASSOCIATIONS` listing every member exactly once, `ORDINAL` and `COUNT`
/// matching it, and `to_repr` returning the declared discriminant.
pub unsafe trait ReflectedEnum: Copy + Send + Sync + 'static {
	/// The declared underlying integer type.
	type Repr: EnumRepr;

	/// Number of declared members.
	const COUNT: usize;

	/// True iff the members' raw values are exactly `0..COUNT` in
	/// declaration order.
	const ORDINAL: bool;

	/// Every (member, name) pair, in declaration order.
	const ASSOCIATIONS: &'static [(Self, &'static str)];

	/// Projects a member onto its raw integral representation.
	fn to_repr(self) -> Self::Repr;
}

/// Marker for the primitive integer types an enum representation may use.
pub trait EnumRepr: PrimInt + fmt::Debug + Send + Sync + 'static {}

impl<T: PrimInt + fmt::Debug + Send + Sync + 'static> EnumRepr for T {}

/// String-adapter mechanism: conversion from the canonical name
/// representation into an arbitrary string type.
///
/// The target type supplies its own total order; the re-projected table is
/// re-sorted under it, since the adapter's output ordering need not match the
/// canonical one.
pub trait EnumString: Ord + Clone + Send + Sync + 'static {
	fn from_name(name: &'static str) -> Self;
}

impl EnumString for &'static str {
	fn from_name(name: &'static str) -> Self {
		name
	}
}

impl EnumString for String {
	fn from_name(name: &'static str) -> Self {
		name.to_owned()
	}
}

impl EnumString for Box<str> {
	fn from_name(name: &'static str) -> Self {
		name.into()
	}
}

impl EnumString for Cow<'static, str> {
	fn from_name(name: &'static str) -> Self {
		Cow::Borrowed(name)
	}
}

/// The ordinality detector: true iff `values` is exactly `0, 1, ..., len-1`.
///
/// Evaluated in the `ORDINAL` initializer of every registration, so the
/// result is a compile-time constant. An empty list is vacuously ordinal.
pub const fn is_ordinal_values(values: &[i128]) -> bool {
	let mut index = 0;
	while index < values.len() {
		if values[index] != index as i128 {
			return false;
		}
		index += 1;
	}
	true
}

/// Projects an enum value onto its raw integral representation.
pub fn to_underlying<E: ReflectedEnum>(value: E) -> E::Repr {
	value.to_repr()
}

/// Number of declared members of `E`.
pub const fn number_of_elements<E: ReflectedEnum>() -> usize {
	E::COUNT
}

/// Whether `E`'s raw values are exactly `0..N` in declaration order.
pub const fn is_ordinal<E: ReflectedEnum>() -> bool {
	E::ORDINAL
}

/// Whether `value` equals some member's raw value.
///
/// An integer that does not fit `E`'s representation is never valid.
pub fn is_valid<E: ReflectedEnum, I: ToPrimitive>(value: I) -> bool {
	match <E::Repr as NumCast>::from(value) {
		Some(repr) => registry::canonical::<E>().is_valid(repr),
		None => false,
	}
}

/// The canonical name of `value`.
pub fn to_string<E: ReflectedEnum>(value: E) -> &'static str {
	*registry::canonical::<E>().to_string(value)
}

/// The name of `value`, through the re-projected table for `S`.
pub fn to_string_as<S: EnumString, E: ReflectedEnum>(value: E) -> S {
	registry::table::<E, S>().to_string(value).clone()
}

/// Looks up a member from a name or an integer; `None` is the
/// absent-indicator for input that matches no member.
///
/// Accepted queries: `&str` (canonical names), any primitive integer, and
/// `&S` for an adapter type `S: EnumString` (consults the re-projected
/// table for `S`).
pub fn to_enum<E: ReflectedEnum, Q: EnumQuery<E>>(query: Q) -> Option<E> {
	query.lookup()
}

/// A value [`to_enum`] accepts: something name-like or integer-like.
pub trait EnumQuery<E: ReflectedEnum> {
	fn lookup(self) -> Option<E>;
}

impl<'a, E: ReflectedEnum> EnumQuery<E> for &'a str {
	fn lookup(self) -> Option<E> {
		registry::canonical::<E>().to_enum_str(self)
	}
}

impl<'a, E: ReflectedEnum, S: EnumString> EnumQuery<E> for &'a S {
	fn lookup(self) -> Option<E> {
		registry::table::<E, S>().to_enum(self)
	}
}

macro_rules! integer_queries {
	($($int:ty),*) => {
		$(
			impl<E: ReflectedEnum> EnumQuery<E> for $int {
				fn lookup(self) -> Option<E> {
					match <E::Repr as NumCast>::from(self) {
						Some(repr) => registry::canonical::<E>().from_repr(repr),
						None => None,
					}
				}
			}
		)*
	};
}

integer_queries!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Every member of `E`: declaration order for ordinal enums, ascending raw
/// value otherwise. Positionally aligned with [`all_enum_strings`].
pub fn all_enum_values<E: ReflectedEnum>() -> AllValues<E> {
	AllValues::new(registry::canonical::<E>())
}

/// Every member's canonical name, in the order of [`all_enum_values`].
pub fn all_enum_strings<E: ReflectedEnum>() -> impl ExactSizeIterator<Item = &'static str> + Clone {
	AllStrings::new(registry::canonical::<E>()).map(|name| *name)
}

/// Every member's name as `S`, in the order of [`all_enum_values`].
pub fn all_enum_strings_as<S: EnumString, E: ReflectedEnum>() -> AllStrings<E, S> {
	AllStrings::new(registry::table::<E, S>())
}

/// Formats a registered enum value by its canonical name.
pub struct EnumDisplay<E>(E);

/// Adapter for formatting integrations: `format!("{}", display(value))`.
pub fn display<E: ReflectedEnum>(value: E) -> EnumDisplay<E> {
	EnumDisplay(value)
}

impl<E: ReflectedEnum> fmt::Display for EnumDisplay<E> {
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str(to_string(self.0))
	}
}

impl<E: ReflectedEnum> fmt::Debug for EnumDisplay<E> {
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str(to_string(self.0))
	}
}

/// Registers an enum without the derive, for declarations that cannot carry
/// it. The member list must be exhaustive and in declaration order; an empty
/// list registers an uninhabited enum with a trivial table.
///
/// ```
/// #[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// #[repr(u8)]
/// enum Color {
///     Red,
///     Green,
///     Blue,
/// }
///
/// enum_tables::register_enum!(Color : u8 { Red, Green, Blue });
///
/// assert_eq!(enum_tables::to_string(Color::Green), "Green");
/// ```
#[macro_export]
macro_rules! register_enum {
	($ty:ty : $repr:ty {}) => {
		unsafe impl $crate::ReflectedEnum for $ty {
			type Repr = $repr;
			const COUNT: usize = 0;
			const ORDINAL: bool = true;
			const ASSOCIATIONS: &'static [(Self, &'static str)] = &[];
			fn to_repr(self) -> Self::Repr {
				match self {}
			}
		}
	};
	($ty:ty : $repr:ty { $($variant:ident),+ $(,)? }) => {
		unsafe impl $crate::ReflectedEnum for $ty {
			type Repr = $repr;
			const COUNT: usize = <Self as $crate::ReflectedEnum>::ASSOCIATIONS.len();
			const ORDINAL: bool =
				$crate::is_ordinal_values(&[$(<$ty>::$variant as i128),+]);
			const ASSOCIATIONS: &'static [(Self, &'static str)] =
				&[$((<$ty>::$variant, ::core::stringify!($variant))),+];
			fn to_repr(self) -> Self::Repr {
				self as $repr
			}
		}
	};
}
