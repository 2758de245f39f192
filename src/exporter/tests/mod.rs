mod pagination;
