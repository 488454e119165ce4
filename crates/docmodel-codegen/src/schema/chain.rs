use super::Shape;

/// The container layers of a reference field, outermost first.
///
/// Links are stored by level: the parent of link `i` is `i - 1` and its
/// child is `i + 1`. The last link is always the terminal.
#[derive(Debug, Clone)]
pub struct Chain {
    links: Vec<Link>,
}

#[derive(Debug, Clone)]
pub struct Link {
    /// Nesting level, 0 for the field itself.
    pub level: usize,

    pub kind: LinkKind,

    /// Type of the resolved value at this layer.
    pub resolved_ty: syn::Type,

    /// Type of the stored identifiers at this layer.
    pub id_ty: syn::Type,
}

#[derive(Debug, Clone)]
pub enum LinkKind {
    Map,
    Pointer,
    Slice,
    Terminal,
}

impl Chain {
    pub fn build(shape: &Shape, resolved: &syn::Type, id: &syn::Type) -> Chain {
        let mut links = vec![];
        let mut current = Some(shape);

        while let Some(shape) = current {
            let kind = match shape {
                Shape::Map { .. } => LinkKind::Map,
                Shape::Pointer { .. } => LinkKind::Pointer,
                Shape::Slice { .. } => LinkKind::Slice,
                Shape::Named { .. } | Shape::Opaque { .. } => LinkKind::Terminal,
            };

            links.push(Link {
                level: links.len(),
                kind,
                resolved_ty: shape.map_terminal(resolved).to_type(),
                id_ty: shape.map_terminal(id).to_type(),
            });

            current = shape.peel();
        }

        Chain { links }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn root(&self) -> &Link {
        &self.links[0]
    }

    pub fn get(&self, level: usize) -> Option<&Link> {
        self.links.get(level)
    }

    pub fn parent(&self, link: &Link) -> Option<&Link> {
        link.level.checked_sub(1).and_then(|level| self.get(level))
    }

    pub fn child(&self, link: &Link) -> Option<&Link> {
        self.get(link.level + 1)
    }

    /// Number of links, terminal included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Link {
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, LinkKind::Terminal)
    }
}
