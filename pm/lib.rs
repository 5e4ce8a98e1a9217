use {
	::num_bigint::BigInt,
	::proc_macro::TokenStream,
	::proc_macro2::{Literal, TokenStream as TokenStream2},
	::quote::quote,
	::syn::{
		parse::{Parse, ParseStream},
		spanned::Spanned,
		Error, Ident, Result,
	},
};

const INTEGER_REPRS: &[&str] = &[
	"i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

fn repr_idents(item: &syn::DeriveInput) -> Result<Vec<Ident>> {
	struct Repr {
		_parens: syn::token::Paren,
		idents: syn::punctuated::Punctuated<Ident, syn::Token![,]>,
	}

	impl Parse for Repr {
		fn parse(input: ParseStream) -> Result<Self> {
			let content;
			Ok(Repr {
				_parens: syn::parenthesized!(content in input),
				idents: content.parse_terminated(Ident::parse)?,
			})
		}
	}

	let mut idents = Vec::new();

	for attr in &item.attrs {
		if attr.path.segments.len() == 1 && attr.path.segments[0].ident == "repr" {
			idents.extend(syn::parse2::<Repr>(attr.tokens.clone())?.idents);
		}
	}

	Ok(idents)
}

fn discriminant_value(expr: &syn::Expr) -> Result<BigInt> {
	match expr {
		syn::Expr::Lit(lit) => match &lit.lit {
			syn::Lit::Int(int) => int
				.base10_digits()
				.parse()
				.map_err(|_| Error::new(int.span(), "unparseable enum discriminant")),
			_ => Err(Error::new(
				lit.span(),
				"enum discriminant must be an integer literal",
			)),
		},
		syn::Expr::Unary(unary) => match unary.op {
			syn::UnOp::Neg(_) => Ok(-discriminant_value(&unary.expr)?),
			_ => Err(Error::new(
				unary.span(),
				"enum discriminant must be an integer literal",
			)),
		},
		_ => Err(Error::new(
			expr.span(),
			"enum discriminant must be an integer literal",
		)),
	}
}

fn expand(item: &syn::DeriveInput) -> Result<TokenStream2> {
	let data = match &item.data {
		syn::Data::Enum(data) => data,
		_ => return Err(Error::new(item.span(), "expected enum")),
	};

	let repr = repr_idents(item)?
		.into_iter()
		.find(|ident| INTEGER_REPRS.iter().any(|candidate| ident == candidate))
		.ok_or_else(|| {
			Error::new(
				item.span(),
				"enum must have a repr( ) attribute naming a primitive integer type",
			)
		})?;

	if data.variants.is_empty() {
		return Err(Error::new(
			item.span(),
			"zero-variant enums cannot carry a primitive repr; register with register_enum! instead",
		));
	}

	let mut previous: Option<BigInt> = None;
	let mut raw_values = Vec::with_capacity(data.variants.len());
	let mut variant_idents = Vec::with_capacity(data.variants.len());
	let mut variant_names = Vec::with_capacity(data.variants.len());

	for variant in &data.variants {
		match &variant.fields {
			syn::Fields::Unit => {}
			_ => {
				return Err(Error::new(
					variant.span(),
					"variants with fields have no single underlying value",
				))
			}
		}

		let value = match &variant.discriminant {
			Some((_, expr)) => discriminant_value(expr)?,
			None => match &previous {
				Some(value) => value.clone() + 1,
				None => BigInt::default(),
			},
		};

		variant_idents.push(variant.ident.clone());
		variant_names.push(syn::LitStr::new(
			&variant.ident.to_string(),
			variant.ident.span(),
		));
		raw_values.push(value.clone());
		previous = Some(value);
	}

	// The detector works in the i128 domain; a value outside it cannot be
	// part of the contiguous sequence from zero.
	let ordinal = match raw_values
		.iter()
		.map(|value| value.to_string().parse::<i128>().ok())
		.collect::<Option<Vec<_>>>()
	{
		Some(values) => {
			let literals = values.into_iter().map(Literal::i128_suffixed);
			quote!(::enum_tables::is_ordinal_values(&[ #( #literals ),* ]))
		}
		None => quote!(false),
	};

	let enum_name = &item.ident;
	let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
	let count = data.variants.len();

	Ok(quote!(
		unsafe impl #impl_generics ::enum_tables::ReflectedEnum for
			#enum_name #ty_generics #where_clause
		{
			type Repr = ::std::primitive::#repr;
			const COUNT: usize = #count;
			const ORDINAL: bool = #ordinal;
			const ASSOCIATIONS: &'static [(Self, &'static str)] =
				&[ #( (#enum_name::#variant_idents, #variant_names) ),* ];

			fn to_repr(self) -> Self::Repr {
				self as ::std::primitive::#repr
			}
		}
	))
}

#[proc_macro_derive(ReflectedEnum)]
pub fn derive_reflected_enum(input: TokenStream) -> TokenStream {
	match syn::parse::<syn::DeriveInput>(input).and_then(|item| expand(&item)) {
		Ok(output) => output.into(),
		Err(err) => err.into_compile_error().into(),
	}
}
